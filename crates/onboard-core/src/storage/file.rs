//! File-backed local storage with atomic writes.
//!
//! One file per key under a root directory. Writes go through a temp file
//! with a PID-unique suffix, are flushed and synced, then renamed over the
//! target so a crash never leaves a half-written value.

use crate::error::{OnboardError, Result};
use crate::storage::LocalStore;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

/// File-per-key [`LocalStore`] implementation.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)
                .map_err(|e| OnboardError::storage_with_path(e, &root))?;
        }
        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed well-known names, but sanitize anyway so a
        // hostile key can never escape the root.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl LocalStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path).map_err(|e| OnboardError::Storage {
            message: format!("Failed to open {}", path.display()),
            path: Some(path.clone()),
            source: Some(e),
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| OnboardError::Storage {
                message: format!("Failed to read {}", path.display()),
                path: Some(path.clone()),
                source: Some(e),
            })?;

        Ok(Some(contents))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let temp_path = path.with_extension(format!("json.{}.tmp", process::id()));

        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| OnboardError::Storage {
                    message: format!("Failed to create temp file {}", temp_path.display()),
                    path: Some(temp_path.clone()),
                    source: Some(e),
                })?;

            file.write_all(value.as_bytes())
                .map_err(|e| OnboardError::Storage {
                    message: format!("Failed to write temp file {}", temp_path.display()),
                    path: Some(temp_path.clone()),
                    source: Some(e),
                })?;

            file.flush().map_err(|e| OnboardError::Storage {
                message: format!("Failed to flush temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

            file.sync_all().map_err(|e| OnboardError::Storage {
                message: format!("Failed to sync temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;
        }

        fs::rename(&temp_path, &path).map_err(|e| OnboardError::Storage {
            message: format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            path: Some(path.clone()),
            source: Some(e),
        })?;

        debug!("Atomically wrote {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(OnboardError::storage_with_path(e, path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("onboard-buddy-tags", r#"{"state":{"tags":[]}}"#).unwrap();
        let value = store.read("onboard-buddy-tags").unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"state":{"tags":[]}}"#));
    }

    #[test]
    fn test_read_absent_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        assert!(store.read("missing").unwrap().is_none());
    }

    #[test]
    fn test_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("data-migration-version", "1").unwrap();
        store.write("data-migration-version", "2").unwrap();
        assert_eq!(
            store.read("data-migration-version").unwrap().as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn test_key_sanitization_stays_in_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.write("../escape", "v").unwrap();
        assert_eq!(store.read("../escape").unwrap().as_deref(), Some("v"));
        // The file must live directly under the root.
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
