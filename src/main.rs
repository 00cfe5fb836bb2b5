//! `RAPTIC` - an easy thin client for Raspberry Pi
//!
//! Shows the thin client menu on the terminal. Takes no arguments; exits
//! with status 0 when the user leaves through the menu and 1 otherwise.

use anyhow::Context;
use raptic::{
    config::ConfigStore,
    controller::MenuController,
    error::get_user_friendly_error,
    prompt::{DialogPrompt, Prompt},
    session::SystemLauncher,
    utils,
};
use tracing::{error, info};

/// Main entry point for the application
fn main() {
    if let Err(e) = utils::init_logging() {
        eprintln!("Warning: file logging disabled: {e}");
    }

    let mut prompt = DialogPrompt::default();

    let store = match ConfigStore::load() {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            if let Err(shown) = prompt.message(&get_user_friendly_error(&e)) {
                error!("Failed to show configuration error: {shown}");
            }
            show_error_and_exit(&mut prompt, &e.to_string());
        }
    };
    info!("Using configuration file {}", store.path().display());

    let mut controller = MenuController::new(store, prompt, SystemLauncher::default());
    match controller.run().context("RAPTIC menu failed") {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{e:#}");
            show_error_and_exit(&mut DialogPrompt::default(), &format!("{e:#}"));
        }
    }
}

/// Clears the screen, prints the error and exits with status 1.
fn show_error_and_exit(prompt: &mut impl Prompt, message: &str) -> ! {
    if let Err(e) = prompt.clear() {
        error!("Failed to clear the screen: {e}");
    }
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
