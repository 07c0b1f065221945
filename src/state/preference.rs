//! Persisted language preference
//!
//! A single key-value pair: the language the visitor last picked.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::errors::{FolioError, Result};

/// Storage for the chosen language
pub trait PreferenceStore {
    /// The stored language, if any
    fn load(&self) -> Result<Option<String>>;

    /// Store a language, replacing any previous value
    fn save(&mut self, language: &str) -> Result<()>;
}

/// Preference kept in memory for the lifetime of the value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    language: Option<String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a language
    pub fn with_language(language: impl Into<String>) -> Self {
        Self { language: Some(language.into()) }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.language.clone())
    }

    fn save(&mut self, language: &str) -> Result<()> {
        self.language = Some(language.to_string());
        Ok(())
    }
}

/// On-disk preference record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPreference {
    language: String,
    updated_at: DateTime<Utc>,
}

/// Preference persisted as a small JSON file
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored language preference");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let stored: StoredPreference = serde_json::from_str(&content).map_err(|e| {
            FolioError::Preference(format!("corrupt preference file {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), language = %stored.language, updated_at = %stored.updated_at,
               "Loaded language preference");
        Ok(Some(stored.language))
    }

    fn save(&mut self, language: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredPreference {
            language: language.to_string(),
            updated_at: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        debug!(path = %self.path.display(), language = language, "Saved language preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryPreferenceStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("fr").unwrap();
        assert_eq!(store.load().unwrap(), Some("fr".to_string()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePreferenceStore::new(dir.path().join("state/preference.json"));

        assert_eq!(store.load().unwrap(), None);
        store.save("fr").unwrap();
        assert_eq!(store.load().unwrap(), Some("fr".to_string()));

        // a fresh handle sees the persisted value
        let reopened = FilePreferenceStore::new(store.path());
        assert_eq!(reopened.load().unwrap(), Some("fr".to_string()));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preference.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(path);
        assert_matches!(store.load(), Err(FolioError::Preference(_)));
    }
}
