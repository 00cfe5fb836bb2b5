#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `RAPTIC` unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::config::Configuration;
use crate::error::{RapticError, Result};
use crate::prompt::{Menu, MenuOutcome, Prompt};
use crate::session::SessionLauncher;
use std::collections::VecDeque;
use tempfile::TempDir;

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A user answer consumed by [`ScriptedPrompt`]
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer to an input box; `None` cancels
    Input(Option<String>),
    /// Answer to a menu
    Menu(MenuOutcome),
}

impl Reply {
    /// Input box accepted with `value`
    pub fn input(value: &str) -> Self {
        Self::Input(Some(value.to_string()))
    }

    /// Menu item chosen with OK
    pub fn select(tag: &str) -> Self {
        Self::Menu(MenuOutcome::Selected(tag.to_string()))
    }

    /// Extra button pressed on a menu
    pub fn extra(tag: &str) -> Self {
        Self::Menu(MenuOutcome::Extra(tag.to_string()))
    }
}

/// Something the code under test asked the prompt to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Message(String),
    Info(String),
    Input { label: String, init: String },
    Menu(Menu),
    Clear,
}

/// Prompt answering from a fixed script and recording what was shown
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    replies: VecDeque<Reply>,
    /// Everything shown, in order
    pub shown: Vec<Shown>,
}

impl ScriptedPrompt {
    /// Prompt that will give `replies` in order
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            shown: Vec::new(),
        }
    }

    /// Texts of all message boxes shown
    pub fn messages(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True when every scripted reply was consumed
    pub fn finished(&self) -> bool {
        self.replies.is_empty()
    }

    fn next(&mut self) -> Reply {
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("script exhausted after {:?}", self.shown.last()))
    }
}

impl Prompt for ScriptedPrompt {
    fn message(&mut self, text: &str) -> Result<()> {
        self.shown.push(Shown::Message(text.to_string()));
        Ok(())
    }

    fn info(&mut self, text: &str, _title: &str) -> Result<()> {
        self.shown.push(Shown::Info(text.to_string()));
        Ok(())
    }

    fn input(&mut self, label: &str, init: &str) -> Result<Option<String>> {
        self.shown.push(Shown::Input {
            label: label.to_string(),
            init: init.to_string(),
        });
        match self.next() {
            Reply::Input(value) => Ok(value),
            other => panic!("input box for {label} got {other:?}"),
        }
    }

    fn menu(&mut self, menu: &Menu) -> Result<MenuOutcome> {
        self.shown.push(Shown::Menu(menu.clone()));
        match self.next() {
            Reply::Menu(outcome) => Ok(outcome),
            other => panic!("menu {:?} got {other:?}", menu.text),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.shown.push(Shown::Clear);
        Ok(())
    }
}

/// How [`RecordingLauncher`] answers remote session requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoteBehavior {
    /// Session runs and exits
    #[default]
    Succeed,
    /// The remote client is not on `PATH`
    ClientMissing,
    /// `xinit` cannot be started
    SpawnFails,
}

/// A session start observed by [`RecordingLauncher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launched {
    Remote(Configuration),
    Local,
}

/// Launcher that records requests instead of spawning processes
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    /// Behavior of remote session starts
    pub remote: RemoteBehavior,
    /// Sessions started, in order
    pub launched: Vec<Launched>,
}

impl RecordingLauncher {
    /// Launcher whose remote sessions behave as given
    pub fn with_remote(remote: RemoteBehavior) -> Self {
        Self {
            remote,
            launched: Vec::new(),
        }
    }
}

impl SessionLauncher for RecordingLauncher {
    fn start_remote_session(&mut self, config: &Configuration) -> Result<()> {
        match self.remote {
            RemoteBehavior::Succeed => {
                config.get("Server")?;
                config.get("User")?;
                config.get_bool("Fullscreen")?;
                self.launched.push(Launched::Remote(config.clone()));
                Ok(())
            }
            RemoteBehavior::ClientMissing => Err(RapticError::ExecutableNotFound {
                program: "rdesktop".to_string(),
                source: which::Error::CannotFindBinaryPath,
            }),
            RemoteBehavior::SpawnFails => Err(RapticError::SessionSpawn {
                program: "xinit".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }

    fn start_local_session(&mut self) -> Result<()> {
        self.launched.push(Launched::Local);
        Ok(())
    }
}

/// Write a complete configuration file into `dir` and return its path
pub fn write_config(dir: &TempDir, server: &str, user: &str, fullscreen: &str) -> std::path::PathBuf {
    let path = dir.path().join(".raptic");
    std::fs::write(
        &path,
        format!("[general]\nServer = {server}\nUser = {user}\nFullscreen = {fullscreen}\n\n"),
    )
    .unwrap();
    path
}
