//! Menu controller implementation
//!
//! This module implements the state machine that drives first start, the
//! main menu and the configuration editor.

use crate::config::models::{self, ConfigurationField, FieldType};
use crate::config::{CONFIGURATION_FIELDS, ConfigStore, Configuration};
use crate::constants::INFO_TITLE;
use crate::error::{RapticError, Result, get_user_friendly_error};
use crate::prompt::{Menu, MenuOutcome, Prompt};
use crate::session::SessionLauncher;
use tracing::{debug, error, info, warn};

const WELCOME_TEXT: &str = "Welcome to RAPTIC!\nThis appears to be the first time you run RAPTIC on \
     this PC. We therefore will generate a new configuration in the following steps.";
const ABORTED_TEXT: &str = "Configuration aborted. No configuration file written...";
const WRITTEN_TEXT: &str = "Configuration file has been written. You can now start using RAPTIC.";
const SAVED_TEXT: &str = "The config has been written to file.";
const MAIN_MENU_TEXT: &str = "What do you want to do?";
const EDIT_MENU_TEXT: &str = "What setting do you want to change?";

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Guided creation of the first configuration
    FirstStart,
    /// Main menu loop
    MainMenu,
    /// Configuration editor working on a staged copy
    EditMenu,
    /// Terminal state carrying the process exit status
    Exiting(i32),
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    /// Start the remote desktop session
    StartThinClient,
    /// Open the configuration editor
    ChangeConfiguration,
    /// Start the local desktop environment
    StartDesktop,
    /// Leave `RAPTIC`
    Exit,
}

impl MainAction {
    /// All entries in menu order
    pub const ALL: [Self; 4] = [
        Self::StartThinClient,
        Self::ChangeConfiguration,
        Self::StartDesktop,
        Self::Exit,
    ];

    /// Tag returned by the prompt for this entry
    pub fn tag(self) -> &'static str {
        match self {
            Self::StartThinClient => "1",
            Self::ChangeConfiguration => "2",
            Self::StartDesktop => "3",
            Self::Exit => "x",
        }
    }

    /// Text shown for this entry
    pub fn label(self) -> &'static str {
        match self {
            Self::StartThinClient => "Start ThinClient",
            Self::ChangeConfiguration => "Change configuration",
            Self::StartDesktop => "Start desktop environment",
            Self::Exit => "Exit RAPTIC",
        }
    }

    /// Entry for a prompt tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.tag() == tag)
    }
}

/// What the user asked for in the configuration editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Edit the staged value of a field
    Change(&'static ConfigurationField),
    /// Commit the staged copy
    Save,
    /// Discard the staged copy
    Back,
}

impl EditAction {
    /// Interpret an editor menu outcome; `None` for an unknown field tag
    pub fn from_outcome(outcome: &MenuOutcome) -> Option<Self> {
        match outcome {
            MenuOutcome::Selected(tag) => models::field(tag).map(Self::Change),
            MenuOutcome::Extra(_) => Some(Self::Save),
            MenuOutcome::Cancelled => Some(Self::Back),
        }
    }
}

/// Reason a value cannot be stored in `field`, if any
fn validate(field: &ConfigurationField, value: &str) -> Option<String> {
    let value = value.trim();
    if field.required && value.is_empty() {
        return Some(format!("{} must not be empty.", field.name));
    }
    if field.field_type == FieldType::Boolean && models::parse_bool(value).is_none() {
        return Some(format!("{} must be yes or no.", field.name));
    }
    None
}

/// First field of `staged` that cannot be saved, with the reason
fn invalid_field(staged: &Configuration) -> Option<String> {
    CONFIGURATION_FIELDS
        .iter()
        .find_map(|field| match staged.value(field.name) {
            Some(value) => validate(field, value),
            None if field.required => Some(format!("{} must not be empty.", field.name)),
            None => None,
        })
}

fn main_menu() -> Menu {
    let mut menu = Menu::new(
        MAIN_MENU_TEXT,
        MainAction::ALL
            .iter()
            .map(|a| (a.tag().to_string(), a.label().to_string()))
            .collect(),
    );
    menu.no_cancel = true;
    menu
}

fn edit_menu(staged: &Configuration) -> Menu {
    let mut menu = Menu::new(
        EDIT_MENU_TEXT,
        CONFIGURATION_FIELDS
            .iter()
            .map(|f| {
                (
                    f.name.to_string(),
                    staged.value(f.name).unwrap_or_default().to_string(),
                )
            })
            .collect(),
    );
    menu.ok_label = Some("CHANGE".to_string());
    menu.cancel_label = Some("BACK".to_string());
    menu.extra_label = Some("SAVE".to_string());
    menu
}

/// Top-level menu state machine
///
/// Owns the configuration store, the prompt and the session launcher for
/// the lifetime of the program.
pub struct MenuController<P, L> {
    store: ConfigStore,
    prompt: P,
    launcher: L,
}

impl<P: Prompt, L: SessionLauncher> MenuController<P, L> {
    /// Create a controller over a loaded store
    pub fn new(store: ConfigStore, prompt: P, launcher: L) -> Self {
        Self {
            store,
            prompt,
            launcher,
        }
    }

    /// Configuration store
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Prompt
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Session launcher
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// State the controller starts in
    pub fn initial_state(&self) -> State {
        if self.store.has_config() {
            State::MainMenu
        } else {
            State::FirstStart
        }
    }

    /// Drive the state machine until exit and return the exit status
    ///
    /// The screen is cleared before returning. Errors mean the prompt could
    /// not be shown; every other failure is reported to the user.
    pub fn run(&mut self) -> Result<i32> {
        let mut state = self.initial_state();
        loop {
            debug!("Entering state {state:?}");
            state = match state {
                State::FirstStart => self.first_start()?,
                State::MainMenu => self.main_menu()?,
                State::EditMenu => self.edit_menu()?,
                State::Exiting(code) => {
                    info!("Exiting with status {code}");
                    if let Err(e) = self.prompt.clear() {
                        warn!("Failed to clear the screen: {e}");
                    }
                    return Ok(code);
                }
            };
        }
    }

    fn first_start(&mut self) -> Result<State> {
        info!("No configuration found, starting first-start setup");
        self.prompt.message(WELCOME_TEXT)?;

        let mut staged = self.store.stage_copy();
        for field in &CONFIGURATION_FIELDS {
            let value = if field.required {
                match self.ask_required(field)? {
                    Some(value) => value,
                    None => {
                        info!("First-start setup cancelled at {}", field.name);
                        self.prompt.message(ABORTED_TEXT)?;
                        return Ok(State::Exiting(1));
                    }
                }
            } else {
                field.default.to_string()
            };
            staged.set(field.name, value);
        }

        match self.store.commit(staged) {
            Ok(()) => {
                self.prompt.message(WRITTEN_TEXT)?;
                Ok(State::MainMenu)
            }
            Err(e @ RapticError::ConfigWrite { .. }) => {
                error!("First-start configuration not written: {e}");
                self.prompt.message(&get_user_friendly_error(&e))?;
                Ok(State::Exiting(1))
            }
            Err(e) => Err(e),
        }
    }

    /// Ask until a valid value is entered; `None` when cancelled
    fn ask_required(&mut self, field: &ConfigurationField) -> Result<Option<String>> {
        loop {
            let Some(value) = self.prompt.input(field.name, "")? else {
                return Ok(None);
            };
            match validate(field, &value) {
                None => return Ok(Some(value.trim().to_string())),
                Some(problem) => self.prompt.message(&problem)?,
            }
        }
    }

    fn main_menu(&mut self) -> Result<State> {
        let tag = match self.prompt.menu(&main_menu())? {
            MenuOutcome::Selected(tag) => tag,
            MenuOutcome::Extra(_) | MenuOutcome::Cancelled => {
                info!("Main menu dismissed without a selection");
                return Ok(State::Exiting(1));
            }
        };

        let Some(action) = MainAction::from_tag(&tag) else {
            warn!("Ignoring unknown main menu tag {tag:?}");
            return Ok(State::MainMenu);
        };

        info!("Main menu: {}", action.label());
        match action {
            MainAction::StartThinClient => self.start_remote_session(),
            MainAction::ChangeConfiguration => Ok(State::EditMenu),
            MainAction::StartDesktop => self.start_local_session(),
            MainAction::Exit => Ok(State::Exiting(0)),
        }
    }

    fn start_remote_session(&mut self) -> Result<State> {
        match self
            .launcher
            .start_remote_session(self.store.configuration())
        {
            Ok(()) => Ok(State::MainMenu),
            Err(e @ RapticError::ExecutableNotFound { .. }) => {
                error!("Cannot start remote session: {e}");
                self.prompt.message(&get_user_friendly_error(&e))?;
                Ok(State::Exiting(1))
            }
            Err(
                e @ (RapticError::MissingKey(_)
                | RapticError::InvalidBoolean { .. }
                | RapticError::SessionSpawn { .. }),
            ) => {
                warn!("Remote session not started: {e}");
                self.prompt.message(&get_user_friendly_error(&e))?;
                Ok(State::MainMenu)
            }
            Err(e) => Err(e),
        }
    }

    fn start_local_session(&mut self) -> Result<State> {
        match self.launcher.start_local_session() {
            Ok(()) => Ok(State::MainMenu),
            Err(e @ RapticError::SessionSpawn { .. }) => {
                warn!("Local desktop not started: {e}");
                self.prompt.message(&get_user_friendly_error(&e))?;
                Ok(State::MainMenu)
            }
            Err(e) => Err(e),
        }
    }

    fn edit_menu(&mut self) -> Result<State> {
        let mut staged = self.store.stage_copy();
        loop {
            let outcome = self.prompt.menu(&edit_menu(&staged))?;
            let Some(action) = EditAction::from_outcome(&outcome) else {
                warn!("Ignoring unknown configuration menu entry {outcome:?}");
                continue;
            };

            match action {
                EditAction::Change(field) => {
                    let current = staged.value(field.name).unwrap_or_default().to_string();
                    let Some(value) = self.prompt.input(field.name, &current)? else {
                        continue;
                    };
                    match validate(field, &value) {
                        None => {
                            debug!("Staged {} = {:?}", field.name, value.trim());
                            staged.set(field.name, value.trim());
                        }
                        Some(problem) => self.prompt.message(&problem)?,
                    }
                }
                EditAction::Save => {
                    if let Some(problem) = invalid_field(&staged) {
                        warn!("Refusing to save configuration: {problem}");
                        self.prompt.message(&problem)?;
                        continue;
                    }
                    match self.store.commit(staged) {
                        Ok(()) => self.prompt.info(SAVED_TEXT, INFO_TITLE)?,
                        Err(e @ RapticError::ConfigWrite { .. }) => {
                            error!("Configuration not saved: {e}");
                            self.prompt.message(&get_user_friendly_error(&e))?;
                        }
                        Err(e) => return Err(e),
                    }
                    return Ok(State::MainMenu);
                }
                EditAction::Back => {
                    info!("Configuration changes discarded");
                    return Ok(State::MainMenu);
                }
            }
        }
    }
}
