//! Persistence layer.

pub mod kv;
