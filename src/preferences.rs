//! Persisted user preferences
//!
//! Currently a single flag: whether completed tasks are shown. It survives
//! process restarts, and a missing or corrupt value silently falls back to
//! the default rather than bothering the user.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Used whenever no valid preference has been persisted yet
pub const DEFAULT_SHOW_DONE_TASKS: bool = true;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPreferences {
    show_done_tasks: bool,
}

/// The persisted "show completed tasks" flag
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    backing_file: PathBuf,
}

impl PreferenceStore {
    /// A store persisted in the default storage folder
    pub fn at_default_location() -> Self {
        Self::new(&crate::config::default_storage_dir().join("preferences.json"))
    }

    pub fn new(path: &Path) -> Self {
        Self { backing_file: PathBuf::from(path) }
    }

    /// Read the persisted flag.
    ///
    /// A missing or unparseable value falls back to the default; this is never
    /// an error for the caller
    pub fn load(&self) -> bool {
        let file = match std::fs::File::open(&self.backing_file) {
            // Nothing persisted yet
            Err(_) => return DEFAULT_SHOW_DONE_TASKS,
            Ok(f) => f,
        };

        match serde_json::from_reader::<_, StoredPreferences>(file) {
            Err(err) => {
                log::warn!("Unparseable preference file {:?}: {}. Using the default.", self.backing_file, err);
                DEFAULT_SHOW_DONE_TASKS
            },
            Ok(stored) => stored.show_done_tasks,
        }
    }

    /// Persist a new value. Best-effort: failures are logged and absorbed.
    ///
    /// The write is synchronous, so a `load` that follows it in the same
    /// process observes the new value
    pub fn save(&self, show_done_tasks: bool) {
        if let Some(parent) = self.backing_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = match std::fs::File::create(&self.backing_file) {
            Err(err) => {
                log::warn!("Unable to save preferences to {:?}: {}", self.backing_file, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &StoredPreferences { show_done_tasks }) {
            log::warn!("Unable to serialize preferences: {}", err);
        }
    }
}
