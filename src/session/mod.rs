//! Session launching module
//!
//! Translates the configuration into the remote desktop invocation and runs
//! it, or the local desktop environment, as a blocking child process.

pub mod launcher;

pub use launcher::{LauncherSettings, RemoteSessionCommand, SessionLauncher, SystemLauncher};
