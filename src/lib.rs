//! `RAPTIC` - an easy thin client for Raspberry Pi
//!
//! Presents a text-mode menu to configure and start a remote desktop session
//! (`rdesktop` under `xinit`), or to fall back to the local desktop
//! environment (`startx`).
//!
//! `MenuController` drives the program as a state machine over a
//! `ConfigStore` (INI file in the home directory), a `Prompt` (menus and
//! input boxes drawn by `dialog`) and a `SessionLauncher` (blocking child
//! processes).

// Module declarations
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod prompt;
pub mod session;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{RapticError, Result};
