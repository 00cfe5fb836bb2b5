//! Interactive prompt primitives
//!
//! Every call blocks until the user answers. A dismissed dialog is a normal
//! outcome (`None` or [`MenuOutcome::Cancelled`]), never an error; errors
//! mean the prompt itself could not be shown.
//!
//! - [`Prompt`]: message box, info box, input box, menu, screen clear
//! - [`DialogPrompt`]: implementation driving the `dialog` program

pub mod dialog;

pub use dialog::DialogPrompt;

use crate::error::Result;

/// A single-choice menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    /// Text shown above the choices
    pub text: String,
    /// `(tag, label)` pairs; the tag is returned on selection
    pub choices: Vec<(String, String)>,
    /// Label of the OK button, if not the default
    pub ok_label: Option<String>,
    /// Label of the cancel button, if not the default
    pub cancel_label: Option<String>,
    /// Label of an extra button; no extra button when `None`
    pub extra_label: Option<String>,
    /// Hide the cancel button
    pub no_cancel: bool,
}

impl Menu {
    /// Menu with default buttons
    pub fn new(text: impl Into<String>, choices: Vec<(String, String)>) -> Self {
        Self {
            text: text.into(),
            choices,
            ok_label: None,
            cancel_label: None,
            extra_label: None,
            no_cancel: false,
        }
    }
}

/// How the user left a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// OK pressed on the given tag
    Selected(String),
    /// Extra button pressed while the given tag was highlighted
    Extra(String),
    /// Cancel or escape
    Cancelled,
}

/// Blocking, modal UI primitives
pub trait Prompt {
    /// Show a message box and wait for acknowledgement
    fn message(&mut self, text: &str) -> Result<()>;

    /// Show a transient info box that needs no acknowledgement
    fn info(&mut self, text: &str, title: &str) -> Result<()>;

    /// Ask for one line of text, pre-filled with `init`; `None` when cancelled
    fn input(&mut self, label: &str, init: &str) -> Result<Option<String>>;

    /// Show a menu and report the chosen tag or button
    fn menu(&mut self, menu: &Menu) -> Result<MenuOutcome>;

    /// Clear the terminal
    fn clear(&mut self) -> Result<()>;
}
