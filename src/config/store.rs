//! Configuration store for loading and saving the `RAPTIC` configuration
//!
//! The configuration lives in the first existing file of
//! [`CONFIG_CANDIDATES`](crate::constants::CONFIG_CANDIDATES). Saves replace
//! that file atomically through a temporary file in the same directory.

use crate::config::ini;
use crate::config::models::Configuration;
use crate::constants::CONFIG_CANDIDATES;
use crate::error::{RapticError, Result};
use crate::utils::paths::expand_path;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Owns the loaded configuration and the path it is saved to
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Configuration,
}

impl ConfigStore {
    /// Expanded default candidate paths, in priority order
    pub fn default_candidates() -> Vec<PathBuf> {
        CONFIG_CANDIDATES.iter().map(|c| expand_path(c)).collect()
    }

    /// Load from the default candidate paths
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_candidates())
    }

    /// Load from the first existing file in `candidates`
    ///
    /// When no candidate exists the store is empty and bound to the first
    /// candidate, which is where first start will write. An existing file
    /// that cannot be read or is not UTF-8 is a `ConfigRead` error.
    pub fn load_from(candidates: &[PathBuf]) -> Result<Self> {
        for candidate in candidates {
            if !candidate.is_file() {
                debug!("No configuration at {}", candidate.display());
                continue;
            }

            // Existing but unreadable files are errors, never treated as absent
            let text =
                std::fs::read_to_string(candidate).map_err(|source| RapticError::ConfigRead {
                    path: candidate.clone(),
                    source,
                })?;

            let config = ini::parse(&text, candidate)?;
            info!(
                "Configuration loaded from {} ({} sections)",
                candidate.display(),
                config.sections().len()
            );
            return Ok(Self {
                path: candidate.clone(),
                config,
            });
        }

        let path = candidates
            .first()
            .cloned()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "no configuration file candidates",
                )
            })?;
        info!(
            "Configuration file not found, first start will write {}",
            path.display()
        );
        Ok(Self {
            path,
            config: Configuration::new(),
        })
    }

    /// Path the configuration is loaded from and saved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True iff at least one section was loaded or committed
    pub fn has_config(&self) -> bool {
        !self.config.is_empty()
    }

    /// Current committed configuration
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Value of a `general` field
    pub fn get(&self, key: &str) -> Result<&str> {
        self.config.get(key)
    }

    /// Value of a `general` field interpreted as a boolean
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.config.get_bool(key)
    }

    /// Independent copy for edit-then-commit workflows
    pub fn stage_copy(&self) -> Configuration {
        self.config.clone()
    }

    /// Write `staged` to the bound path and make it the current configuration
    ///
    /// Uses a temporary file and rename so an interrupted save never leaves a
    /// half-written file. A symlinked path is written through to its target
    /// and the existing file's permissions are kept. The in-memory
    /// configuration is untouched on error.
    pub fn commit(&mut self, staged: Configuration) -> Result<()> {
        let write_error = |source: std::io::Error| RapticError::ConfigWrite {
            path: self.path.clone(),
            source,
        };

        let target = match std::fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(write_error(e)),
        };
        if target != self.path {
            debug!("Saving through symlink to {}", target.display());
        }

        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
        temp.write_all(ini::serialize(&staged).as_bytes())
            .map_err(write_error)?;
        if let Ok(existing) = std::fs::metadata(&target) {
            temp.as_file()
                .set_permissions(existing.permissions())
                .map_err(write_error)?;
        }
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(&target).map_err(|e| write_error(e.error))?;

        info!("Configuration saved to {}", self.path.display());
        self.config = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;

    #[test]
    fn test_default_candidates_order() {
        let candidates = ConfigStore::default_candidates();
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].ends_with(".raptic"));
        assert!(candidates[1].ends_with(".config/raptic"));
        assert!(candidates.iter().all(|c| c.is_absolute()));
    }

    #[test]
    fn test_load_missing_binds_first_candidate() {
        let dir = create_test_dir();
        let first = dir.path().join(".raptic");
        let second = dir.path().join("raptic");

        let store = ConfigStore::load_from(&[first.clone(), second]).unwrap();
        assert!(!store.has_config());
        assert_eq!(store.path(), first);
    }

    #[test]
    fn test_load_prefers_first_existing_candidate() {
        let dir = create_test_dir();
        let first = dir.path().join(".raptic");
        let second = dir.path().join("raptic");
        std::fs::write(&first, "[general]\nServer = first\n").unwrap();
        std::fs::write(&second, "[general]\nServer = second\n").unwrap();

        let store = ConfigStore::load_from(&[first.clone(), second]).unwrap();
        assert_eq!(store.get("Server").unwrap(), "first");
        assert_eq!(store.path(), first);
    }

    #[test]
    fn test_load_falls_through_to_second_candidate() {
        let dir = create_test_dir();
        let first = dir.path().join(".raptic");
        let second = dir.path().join("raptic");
        std::fs::write(&second, "[general]\nServer = second\n").unwrap();

        let store = ConfigStore::load_from(&[first, second.clone()]).unwrap();
        assert_eq!(store.get("Server").unwrap(), "second");
        assert_eq!(store.path(), second);
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = create_test_dir();
        let path = dir.path().join(".raptic");
        std::fs::write(&path, "Server = no section\n").unwrap();

        let err = ConfigStore::load_from(&[path]).unwrap_err();
        assert!(matches!(err, RapticError::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_load_undecodable_file_is_read_error() {
        let dir = create_test_dir();
        let first = dir.path().join(".raptic");
        let second = dir.path().join("raptic");
        let bytes = b"[general]\nServer = host\nUser = J\xfcrgen\nFullscreen = yes\n";
        std::fs::write(&first, bytes).unwrap();
        std::fs::write(&second, "[general]\nServer = second\n").unwrap();

        let err = ConfigStore::load_from(&[first.clone(), second]).unwrap_err();
        assert!(matches!(err, RapticError::ConfigRead { path: ref p, .. } if *p == first));
        assert_eq!(std::fs::read(&first).unwrap(), bytes);
    }

    #[cfg(unix)]
    #[test]
    fn test_commit_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_dir();
        let path = dir.path().join(".raptic");
        std::fs::write(&path, "[general]\nServer = a\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let mut store = ConfigStore::load_from(&[path.clone()]).unwrap();

        let mut staged = store.stage_copy();
        staged.set("Server", "b");
        store.commit(staged).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_commit_writes_through_symlink() {
        let dir = create_test_dir();
        let target = dir.path().join("shared.ini");
        let link = dir.path().join(".raptic");
        std::fs::write(&target, "[general]\nServer = a\n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let mut store = ConfigStore::load_from(&[link.clone()]).unwrap();

        let mut staged = store.stage_copy();
        staged.set("Server", "b");
        store.commit(staged).unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(std::fs::read_to_string(&target).unwrap().contains("Server = b"));
    }

    #[test]
    fn test_load_directory_candidate_is_skipped() {
        let dir = create_test_dir();
        let as_dir = dir.path().join(".raptic");
        std::fs::create_dir(&as_dir).unwrap();

        let store = ConfigStore::load_from(&[as_dir.clone()]).unwrap();
        assert!(!store.has_config());
        assert_eq!(store.path(), as_dir);
    }

    #[test]
    fn test_commit_writes_and_replaces() {
        let dir = create_test_dir();
        let path = dir.path().join(".raptic");
        let mut store = ConfigStore::load_from(&[path.clone()]).unwrap();

        let mut staged = store.stage_copy();
        staged.set("Server", "10.0.0.5");
        staged.set("User", "pi");
        staged.set("Fullscreen", "yes");
        store.commit(staged).unwrap();

        assert!(store.has_config());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[general]\nServer = 10.0.0.5\nUser = pi\nFullscreen = yes\n\n"
        );
    }

    #[test]
    fn test_stage_copy_is_independent() {
        let dir = create_test_dir();
        let path = dir.path().join(".raptic");
        std::fs::write(&path, "[general]\nServer = a\n").unwrap();
        let store = ConfigStore::load_from(&[path]).unwrap();

        let mut staged = store.stage_copy();
        staged.set("Server", "b");
        assert_eq!(store.get("Server").unwrap(), "a");
    }

    #[test]
    fn test_commit_to_missing_directory_fails_and_keeps_state() {
        let dir = create_test_dir();
        let path = dir.path().join("missing").join("raptic");
        let mut store = ConfigStore::load_from(&[path.clone()]).unwrap();

        let mut staged = store.stage_copy();
        staged.set("Server", "host");
        let err = store.commit(staged).unwrap_err();

        assert!(matches!(err, RapticError::ConfigWrite { path: ref p, .. } if *p == path));
        assert!(!store.has_config());
        assert!(!path.exists());
    }

    #[test]
    fn test_commit_leaves_no_temp_files() {
        let dir = create_test_dir();
        let path = dir.path().join(".raptic");
        let mut store = ConfigStore::load_from(&[path]).unwrap();

        let mut staged = store.stage_copy();
        staged.set("User", "pi");
        store.commit(staged).unwrap();

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
