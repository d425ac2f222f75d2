//! Keyboard shortcut constants for consistent documentation.

pub const HELP: &str = "F1";
pub const THEME: &str = "F2";
pub const FAVORITES_ONLY: &str = "F3";
pub const PROMO: &str = "F4";
pub const TOGGLE_FAVORITE: &str = "Ctrl+F";
pub const OPEN: &str = "Enter";
pub const HISTORY_CYCLE: &str = "Ctrl+R";
pub const CLEAR_OR_QUIT: &str = "Esc";
pub const QUIT: &str = "Ctrl+C";

// Navigation
pub const MOVE: &str = "↑/↓/←/→";
pub const JUMP_TOP: &str = "Home";
pub const JUMP_BOTTOM: &str = "End";

// Modal
pub const MODAL_CLOSE: &str = "Esc";
pub const MODAL_CONFIRM: &str = "Enter";
