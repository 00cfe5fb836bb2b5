//! Path expansion for configuration file candidates
//!
//! Candidates are written as `~/...` and may reference environment variables
//! as `$VAR` or `${VAR}`. Variables are expanded first, then the leading
//! tilde, then the result is made absolute.

use std::path::{Path, PathBuf};

/// Expand a candidate path using the process environment and home directory
pub fn expand_path(raw: &str) -> PathBuf {
    let home = dirs::home_dir();
    let expanded = expand_with(raw, home.as_deref(), |name| std::env::var(name).ok());
    std::path::absolute(&expanded).unwrap_or(expanded)
}

/// Expand `$VAR`, `${VAR}` and a leading `~` using the given lookups
///
/// Unknown variables and a `~` without a home directory are left as written.
pub fn expand_with(
    raw: &str,
    home: Option<&Path>,
    var: impl Fn(&str) -> Option<String>,
) -> PathBuf {
    let vars = expand_vars(raw, var);

    if let Some(home) = home {
        if vars == "~" {
            return home.to_path_buf();
        }
        if let Some(rest) = vars.strip_prefix("~/") {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(vars)
}

fn expand_vars(raw: &str, var: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (name, token_len) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match (name.is_empty(), var(name)) {
            (false, Some(value)) => out.push_str(&value),
            _ => out.push_str(&rest[dollar..=dollar + token_len]),
        }
        rest = &rest[dollar + 1 + token_len..];
    }

    out.push_str(rest);
    out
}
