//! INI reading and writing
//!
//! Supports the dialect the configuration file has always used: `[section]`
//! headers, `key = value` or `key: value` entries, `#`/`;` comment lines and
//! indented continuation lines for multi-line values.

use crate::config::models::{Configuration, Section};
use crate::error::{RapticError, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Parse INI text into a [`Configuration`]
///
/// `path` is only used to label parse errors.
pub fn parse(text: &str, path: &Path) -> Result<Configuration> {
    let error = |line: usize, message: &str| RapticError::ConfigParse {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    };

    let mut sections: Vec<Section> = Vec::new();
    // Whether the last non-blank line was an entry that can be continued
    let mut continuable = false;

    for (index, raw) in text.lines().enumerate() {
        let number = index + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continuable = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indented = raw.starts_with(' ') || raw.starts_with('\t');
        if indented && continuable {
            if let Some((_, value)) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                value.push('\n');
                value.push_str(trimmed);
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| error(number, "unterminated section header"))?
                .trim();
            if sections.iter().any(|s| s.name == name) {
                return Err(error(number, &format!("duplicate section [{name}]")));
            }
            sections.push(Section::new(name));
            continuable = false;
            continue;
        }

        let section = sections
            .last_mut()
            .ok_or_else(|| error(number, "entry before the first section header"))?;
        let delimiter = trimmed
            .find(['=', ':'])
            .ok_or_else(|| error(number, "missing '=' or ':'"))?;
        let key = trimmed[..delimiter].trim();
        let value = trimmed[delimiter + 1..].trim();
        if key.is_empty() {
            return Err(error(number, "empty key"));
        }
        if section.get(key).is_some() {
            return Err(error(
                number,
                &format!("duplicate key {key} in [{}]", section.name),
            ));
        }
        section.entries.push((key.to_string(), value.to_string()));
        continuable = true;
    }

    Ok(Configuration::from_sections(sections))
}

/// Serialize a [`Configuration`] as INI text
pub fn serialize(config: &Configuration) -> String {
    let mut out = String::new();
    for section in config.sections() {
        let _ = writeln!(out, "[{}]", section.name);
        for (key, value) in &section.entries {
            let _ = writeln!(out, "{key} = {}", value.replace('\n', "\n\t"));
        }
        out.push('\n');
    }
    out
}
