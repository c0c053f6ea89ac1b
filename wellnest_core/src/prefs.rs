//! The one piece of state that survives a restart: whether the user has
//! already been through the camera/gallery permission prompt.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::PrefsError;

pub trait PreferenceStore {
    fn has_visited(&self) -> bool;
    fn mark_visited(&mut self) -> Result<(), PrefsError>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    has_visited: bool,
}

/// JSON file backed store. A missing or unreadable file reads as "not
/// visited" so the prompt is shown rather than skipped.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    prefs: PrefsFile,
}

impl JsonPreferenceStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let prefs = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("ignoring malformed preferences at {}: {err}", path.display());
                PrefsFile::default()
            }),
            Err(_) => PrefsFile::default(),
        };
        Self { path, prefs }
    }

    fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.prefs)?;
        fs::write(&self.path, raw)?;
        debug!("saved preferences to {}", self.path.display());
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn has_visited(&self) -> bool {
        self.prefs.has_visited
    }

    fn mark_visited(&mut self) -> Result<(), PrefsError> {
        if self.prefs.has_visited {
            return Ok(());
        }
        self.prefs.has_visited = true;
        self.save()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    visited: bool,
}

impl MemoryPreferenceStore {
    pub fn visited() -> Self {
        Self { visited: true }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn has_visited(&self) -> bool {
        self.visited
    }

    fn mark_visited(&mut self) -> Result<(), PrefsError> {
        self.visited = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn visited_flag_survives_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("data").join("prefs.json");

        let mut store = JsonPreferenceStore::open(&path);
        assert!(!store.has_visited());
        store.mark_visited().expect("save");

        let reopened = JsonPreferenceStore::open(&path);
        assert!(reopened.has_visited());
    }

    #[test]
    fn malformed_file_reads_as_unvisited() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").expect("write");
        assert!(!JsonPreferenceStore::open(&path).has_visited());
    }
}
