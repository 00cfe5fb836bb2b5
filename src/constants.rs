//! Global constants for `RAPTIC`
//!
//! Centralized location for program names, file locations and UI texts

/// Background title drawn behind every dialog
pub const BACKGROUND_TITLE: &str = "RAPTIC - an easy thin client for raspberry pi";

/// Title of transient info boxes
pub const INFO_TITLE: &str = "RAPTIC";

/// Configuration file candidates, tried in order; the first existing file wins
pub const CONFIG_CANDIDATES: [&str; 2] = ["~/.raptic", "~/.config/raptic"];

/// Section holding all configuration fields
pub const GENERAL_SECTION: &str = "general";

/// Program used to draw menus, input and message boxes
pub const DIALOG_PROGRAM: &str = "dialog";

/// Remote desktop client, looked up on `PATH`
pub const REMOTE_CLIENT_PROGRAM: &str = "rdesktop";

/// Minimal X session starter wrapping the remote desktop client
pub const XINIT_PROGRAM: &str = "xinit";

/// Local desktop environment starter
pub const DESKTOP_PROGRAM: &str = "startx";

/// Program run to clear the terminal on exit
pub const CLEAR_PROGRAM: &str = "clear";

/// Virtual terminal the remote session's X server is started on
pub const SESSION_TTY: u32 = 1;

/// How long a transient info box stays visible, in milliseconds
pub const INFOBOX_DURATION_MS: u64 = 1000;

/// Directory name used below the state directory for log files
pub const LOG_DIR_NAME: &str = "raptic";
