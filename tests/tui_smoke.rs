//! TUI smoke tests.
//!
//! All tests use `--once` and `TUI_HEADLESS=1`, which renders one frame into an
//! in-memory buffer and prints it to stdout.

use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod util;
use util::Sandbox;

fn headless(sandbox: &Sandbox) -> assert_cmd::Command {
    let mut cmd = sandbox.cmd();
    cmd.args(["tui", "--once"]).env("TUI_HEADLESS", "1");
    cmd
}

#[test]
fn tui_once_renders_cards_and_chrome() {
    let sandbox = Sandbox::new();
    headless(&sandbox)
        .assert()
        .success()
        .stdout(contains("TyO Directory"))
        .stdout(contains("Type to search categories…"))
        .stdout(contains("Anatomy"))
        .stdout(contains("Biomechanics"))
        .stdout(contains("F1 help"));
}

#[test]
fn tui_once_shows_favorite_badge() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["fav", "toggle", "anatomy"]).assert().success();
    headless(&sandbox)
        .assert()
        .success()
        .stdout(contains("♥ 1"));
}

#[test]
fn tui_once_shows_saved_theme() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["theme", "set", "light"]).assert().success();
    headless(&sandbox)
        .assert()
        .success()
        .stdout(contains("[F2] light"));
}

#[test]
fn tui_once_survives_missing_catalog() {
    let sandbox = Sandbox::new();
    fs::remove_file(sandbox.catalog_path()).unwrap();
    headless(&sandbox)
        .assert()
        .success()
        .stdout(contains("TyO Directory"))
        .stdout(contains("Anatomy").not());
}

#[test]
fn tui_once_survives_malformed_catalog() {
    let sandbox = Sandbox::with_catalog("{ not json");
    headless(&sandbox)
        .assert()
        .success()
        .stdout(contains("TyO Directory"));
}

#[test]
fn tui_once_skips_malformed_entries() {
    let sandbox = Sandbox::with_catalog(
        r#"{
  "good": {"title": "Good Entry", "url": "https://example.com/good"},
  "bad": {"title": 7},
  "blank": {"title": "", "url": "https://example.com/blank"}
}"#,
    );
    headless(&sandbox)
        .assert()
        .success()
        .stdout(contains("Good Entry"))
        .stdout(contains("blank").not());
}
