//! Configuration management module
//!
//! This module handles loading, saving, and editing the thin client
//! configuration. Configuration is stored as INI in `~/.raptic` or
//! `~/.config/raptic` with atomic writes to prevent corruption.

pub mod ini;
pub mod models;
pub mod store;

pub use models::{CONFIGURATION_FIELDS, Configuration, ConfigurationField, FieldType, Section};
pub use store::ConfigStore;
