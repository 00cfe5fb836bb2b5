//! Session launcher implementation
//!
//! Starts the remote desktop client under `xinit`, or the local desktop
//! environment, and blocks until the session ends. Exit statuses are logged
//! but never change control flow.

use crate::config::Configuration;
use crate::constants::{DESKTOP_PROGRAM, REMOTE_CLIENT_PROGRAM, SESSION_TTY, XINIT_PROGRAM};
use crate::error::{RapticError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{info, warn};

/// Starts blocking session processes
pub trait SessionLauncher {
    /// Run the remote desktop session described by `config` until it exits
    fn start_remote_session(&mut self, config: &Configuration) -> Result<()>;

    /// Run the local desktop environment until it exits
    fn start_local_session(&mut self) -> Result<()>;
}

/// Program names used by [`SystemLauncher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherSettings {
    /// Remote desktop client, resolved on `PATH`
    pub remote_client: String,
    /// X session bootstrap wrapping the client
    pub xinit: String,
    /// Local desktop environment starter
    pub desktop: String,
    /// Virtual terminal number for the remote session's display
    pub tty: u32,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            remote_client: REMOTE_CLIENT_PROGRAM.to_string(),
            xinit: XINIT_PROGRAM.to_string(),
            desktop: DESKTOP_PROGRAM.to_string(),
            tty: SESSION_TTY,
        }
    }
}

/// Fully resolved remote session invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSessionCommand {
    program: String,
    args: Vec<String>,
}

impl RemoteSessionCommand {
    /// Build `<xinit> <client> -u <user> <server> [-f] -- :<tty>`
    pub fn new(
        settings: &LauncherSettings,
        client: &Path,
        config: &Configuration,
    ) -> Result<Self> {
        let user = config.get("User")?;
        let server = config.get("Server")?;
        let fullscreen = config.get_bool("Fullscreen")?;

        let mut args = vec![
            client.to_string_lossy().into_owned(),
            "-u".to_string(),
            user.to_string(),
            server.to_string(),
        ];
        if fullscreen {
            args.push("-f".to_string());
        }
        args.push("--".to_string());
        args.push(format!(":{}", settings.tty));

        Ok(Self {
            program: settings.xinit.clone(),
            args,
        })
    }

    /// Program that is executed
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Equivalent shell command line, for logging
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Launcher spawning real processes
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    settings: LauncherSettings,
}

impl SystemLauncher {
    /// Create a launcher with custom program names
    pub fn new(settings: LauncherSettings) -> Self {
        Self { settings }
    }

    /// Resolve the remote desktop client on `PATH`
    pub fn resolve_client(&self) -> Result<PathBuf> {
        which::which(&self.settings.remote_client).map_err(|source| {
            RapticError::ExecutableNotFound {
                program: self.settings.remote_client.clone(),
                source,
            }
        })
    }

    fn wait(program: &str, command: &mut Command) -> Result<ExitStatus> {
        let status = command
            .status()
            .map_err(|source| RapticError::SessionSpawn {
                program: program.to_string(),
                source,
            })?;
        if status.success() {
            info!("{program} exited normally");
        } else {
            warn!("{program} exited with {status}");
        }
        Ok(status)
    }
}

impl SessionLauncher for SystemLauncher {
    fn start_remote_session(&mut self, config: &Configuration) -> Result<()> {
        let client = self.resolve_client()?;
        let session = RemoteSessionCommand::new(&self.settings, &client, config)?;
        info!("Starting remote session: {}", session.command_line());

        Self::wait(
            session.program(),
            Command::new(session.program())
                .args(session.args())
                .stdout(Stdio::null())
                .stderr(Stdio::null()),
        )?;
        Ok(())
    }

    fn start_local_session(&mut self) -> Result<()> {
        info!("Starting local desktop: {}", self.settings.desktop);
        Self::wait(&self.settings.desktop, &mut Command::new(&self.settings.desktop))?;
        Ok(())
    }
}
