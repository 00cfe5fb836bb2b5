//! Error types for `RAPTIC`
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains so the log file
//! shows the underlying I/O or lookup failure, while the message box shows
//! the text from [`get_user_friendly_error`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for `RAPTIC`
#[derive(Debug, Error)]
pub enum RapticError {
    /// Configuration file is malformed
    #[error("Failed to parse {path} at line {line}: {message}")]
    ConfigParse {
        /// File that failed to parse
        path: PathBuf,
        /// 1-based line number of the offending line
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Configuration file exists but could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be written
    #[error("Configuration file {path} is not writeable: {source}")]
    ConfigWrite {
        /// Target path of the write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A value that should be boolean holds some other token
    #[error("Not a boolean: {key} = {value:?}")]
    InvalidBoolean {
        /// Key holding the value
        key: String,
        /// The unrecognised token
        value: String,
    },

    /// A required key is absent from the `general` section
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// An external program could not be found on `PATH`
    #[error("Executable not found in PATH: {program}")]
    ExecutableNotFound {
        /// Program name that was looked up
        program: String,
        /// Lookup failure
        #[source]
        source: which::Error,
    },

    /// A session process could not be started
    #[error("Failed to start {program}: {source}")]
    SessionSpawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dialog program could not be run
    #[error("Failed to run the dialog program: {source}")]
    PromptFailed {
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dialog program exited with a status that maps to no button
    #[error("Dialog exited with unexpected status {code:?}")]
    UnexpectedPromptExit {
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for `RAPTIC` operations
pub type Result<T> = std::result::Result<T, RapticError>;

/// Convert an error to a user-friendly message
///
/// Returns the text shown in a message box when an operation fails.
pub fn get_user_friendly_error(error: &RapticError) -> String {
    match error {
        RapticError::ConfigParse {
            path,
            line,
            message,
        } => format!(
            "Configuration file \"{}\" is malformed.\n\n\
             Line {line}: {message}\n\n\
             Fix or remove the file and start RAPTIC again.",
            path.display()
        ),
        RapticError::ConfigRead { path, source } => format!(
            "Configuration file \"{}\" could not be read:\n\n{source}",
            path.display()
        ),
        RapticError::ConfigWrite { path, .. } => {
            format!("Configuration file \"{}\" is not writeable.", path.display())
        }
        RapticError::InvalidBoolean { key, value } => format!(
            "The setting {key} has the value \"{value}\", which is not yes or no.\n\n\
             Please change it in the configuration menu."
        ),
        RapticError::MissingKey(key) => format!(
            "The setting {key} is missing from the configuration.\n\n\
             Please set it in the configuration menu."
        ),
        RapticError::ExecutableNotFound { program, .. } => format!(
            "It appears that {program} is not in your PATH. This could be because \
             of wrong settings or {program} is currently not installed."
        ),
        RapticError::SessionSpawn { program, source } => {
            format!("Could not start {program}:\n\n{source}")
        }
        RapticError::PromptFailed { source } => {
            format!("The dialog program could not be run:\n\n{source}")
        }
        RapticError::UnexpectedPromptExit { code } => match code {
            Some(code) => format!("The dialog program exited with status {code}."),
            None => "The dialog program was terminated by a signal.".to_string(),
        },
        RapticError::IoError(e) => format!(
            "A file system error occurred:\n\n{e}\n\n\
             Please check file permissions and disk space."
        ),
    }
}
