//! `dialog(1)` backed prompt
//!
//! Each primitive runs the `dialog` program once with auto-sized widgets.
//! The widget is drawn on the terminal; the answer is read from dialog's
//! stdout (`--stdout`) and the pressed button from its exit status.

use crate::constants::{BACKGROUND_TITLE, CLEAR_PROGRAM, DIALOG_PROGRAM, INFOBOX_DURATION_MS};
use crate::error::{RapticError, Result};
use crate::prompt::{Menu, MenuOutcome, Prompt};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::debug;

/// Button reported by dialog's exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Button {
    Ok,
    Cancel,
    Extra,
}

impl Button {
    /// Map dialog's exit status; escape (255) counts as cancel
    fn from_status(code: Option<i32>) -> Result<Self> {
        match code {
            Some(0) => Ok(Self::Ok),
            Some(1 | 255) => Ok(Self::Cancel),
            Some(3) => Ok(Self::Extra),
            other => Err(RapticError::UnexpectedPromptExit { code: other }),
        }
    }
}

/// Prompt drawn by the external `dialog` program
#[derive(Debug, Clone)]
pub struct DialogPrompt {
    program: String,
    backtitle: String,
    info_duration: Duration,
}

impl Default for DialogPrompt {
    fn default() -> Self {
        Self::new(DIALOG_PROGRAM, BACKGROUND_TITLE)
    }
}

impl DialogPrompt {
    /// Create a prompt running `program` with the given background title
    pub fn new(program: impl Into<String>, backtitle: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            backtitle: backtitle.into(),
            info_duration: Duration::from_millis(INFOBOX_DURATION_MS),
        }
    }

    fn base_args(&self) -> Vec<String> {
        vec![
            "--backtitle".to_string(),
            self.backtitle.clone(),
            "--stdout".to_string(),
        ]
    }

    fn msgbox_args(&self, text: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.extend(["--msgbox".into(), text.into(), "0".into(), "0".into()]);
        args
    }

    fn infobox_args(&self, text: &str, title: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.extend([
            "--title".into(),
            title.into(),
            "--infobox".into(),
            text.into(),
            "0".into(),
            "0".into(),
        ]);
        args
    }

    fn inputbox_args(&self, label: &str, init: &str) -> Vec<String> {
        let mut args = self.base_args();
        args.extend([
            "--inputbox".into(),
            label.into(),
            "0".into(),
            "0".into(),
            init.into(),
        ]);
        args
    }

    fn menu_args(&self, menu: &Menu) -> Vec<String> {
        let mut args = self.base_args();
        if let Some(label) = &menu.ok_label {
            args.extend(["--ok-label".into(), label.clone()]);
        }
        if let Some(label) = &menu.cancel_label {
            args.extend(["--cancel-label".into(), label.clone()]);
        }
        if let Some(label) = &menu.extra_label {
            args.extend(["--extra-button".into(), "--extra-label".into(), label.clone()]);
        }
        if menu.no_cancel {
            args.push("--no-cancel".into());
        }
        args.extend([
            "--menu".into(),
            menu.text.clone(),
            "0".into(),
            "0".into(),
            "0".into(),
        ]);
        for (tag, label) in &menu.choices {
            args.push(tag.clone());
            args.push(label.clone());
        }
        args
    }

    /// Run dialog and return the pressed button with its stdout
    fn run(&self, args: &[String]) -> Result<(Button, String)> {
        debug!("Running {} {:?}", self.program, args);
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| RapticError::PromptFailed { source })?;

        let button = Button::from_status(output.status.code())?;
        let text = String::from_utf8_lossy(&output.stdout);
        let text = text.strip_suffix('\n').unwrap_or(&text).to_string();
        debug!("{} returned {:?} {:?}", self.program, button, text);
        Ok((button, text))
    }
}

impl Prompt for DialogPrompt {
    fn message(&mut self, text: &str) -> Result<()> {
        self.run(&self.msgbox_args(text)).map(|_| ())
    }

    fn info(&mut self, text: &str, title: &str) -> Result<()> {
        self.run(&self.infobox_args(text, title))?;
        std::thread::sleep(self.info_duration);
        Ok(())
    }

    fn input(&mut self, label: &str, init: &str) -> Result<Option<String>> {
        let (button, text) = self.run(&self.inputbox_args(label, init))?;
        Ok((button == Button::Ok).then_some(text))
    }

    fn menu(&mut self, menu: &Menu) -> Result<MenuOutcome> {
        let (button, tag) = self.run(&self.menu_args(menu))?;
        Ok(match button {
            Button::Ok => MenuOutcome::Selected(tag),
            Button::Extra => MenuOutcome::Extra(tag),
            Button::Cancel => MenuOutcome::Cancelled,
        })
    }

    fn clear(&mut self) -> Result<()> {
        Command::new(CLEAR_PROGRAM)
            .status()
            .map(|_| ())
            .map_err(|source| RapticError::PromptFailed { source })
    }
}
