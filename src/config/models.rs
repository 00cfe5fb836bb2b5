//! Configuration data models
//!
//! This module defines the compiled-in field schema and the in-memory
//! key/value configuration it describes.

use crate::constants::GENERAL_SECTION;
use crate::error::{RapticError, Result};

/// Value type of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free-form text
    String,
    /// `yes`/`no` style flag
    Boolean,
}

/// Describes one configurable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationField {
    /// Key written to the configuration file
    pub name: &'static str,
    /// Human readable description
    pub description: &'static str,
    /// Type of the stored value
    pub field_type: FieldType,
    /// Value used when the field is not prompted for
    pub default: &'static str,
    /// Whether first start asks the user for a value
    pub required: bool,
}

/// All settings known to `RAPTIC`, in menu order
pub const CONFIGURATION_FIELDS: [ConfigurationField; 3] = [
    ConfigurationField {
        name: "Server",
        description: "Hostname or IP-Address of the ThinClient-Host-Server",
        field_type: FieldType::String,
        default: "",
        required: true,
    },
    ConfigurationField {
        name: "User",
        description: "Username of the user that should be used by this ThinClient",
        field_type: FieldType::String,
        default: "",
        required: true,
    },
    ConfigurationField {
        name: "Fullscreen",
        description: "Run rdesktop in fullscreen mode (default: yes)",
        field_type: FieldType::Boolean,
        default: "yes",
        required: false,
    },
];

/// Look up a schema field by name, ignoring ASCII case
pub fn field(name: &str) -> Option<&'static ConfigurationField> {
    CONFIGURATION_FIELDS
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Parse a boolean token
///
/// Accepts `1`, `yes`, `true`, `on` and `0`, `no`, `false`, `off` in any case.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// One `[name]` block of the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section name as written in the header
    pub name: String,
    /// Key/value pairs in file order
    pub entries: Vec<(String, String)>,
}

impl Section {
    /// Create an empty section
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Value stored under `key`, ignoring ASCII case of the key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value under `key` in place, or append a new entry
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }
}

/// Sectioned key/value configuration
///
/// Only the `general` section is interpreted; other sections are carried
/// through load and save untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    sections: Vec<Section>,
}

impl Configuration {
    /// Create a configuration with no sections
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from parsed sections
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All sections in file order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True when no section has been loaded or created
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section by exact name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Value of `key` in the `general` section, if present
    pub fn value(&self, key: &str) -> Option<&str> {
        self.section(GENERAL_SECTION).and_then(|s| s.get(key))
    }

    /// Value of `key` in the `general` section
    pub fn get(&self, key: &str) -> Result<&str> {
        self.value(key)
            .ok_or_else(|| RapticError::MissingKey(key.to_string()))
    }

    /// Value of `key` in the `general` section, interpreted as a boolean
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get(key)?;
        parse_bool(value).ok_or_else(|| RapticError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Set `key` in the `general` section, creating the section if needed
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.section_mut(GENERAL_SECTION).set(key, value);
    }
}
