//! Driver reference store.
//!
//! A JSON file mapping assignee identifiers to display names and vehicle
//! plates, refreshed by the `sync-drivers` command and read-only during a
//! report run.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Reference record for one driver/vehicle assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub assignee_id: String,
    /// Display name; by convention prefixed with a bracketed temperature
    /// code, e.g. `"[DRY] Budi Santoso"`.
    pub name: String,
    pub plate: String,
    pub hub_id: String,
}

/// The full reference table, as persisted on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverStore {
    pub drivers: Vec<DriverRecord>,
}

impl DriverStore {
    /// Load the store from disk. A missing file yields an empty store so
    /// the very first `sync-drivers` run has something to merge into.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "driver store not found, starting empty");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DriverStoreIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let store: Self = serde_json::from_str(&content)?;
        Ok(store)
    }

    /// Persist the store atomically: write a sibling temp file, then rename
    /// over the destination.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on serialization or filesystem failure.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |e: std::io::Error| ConfigError::DriverStoreIo {
            path: path.display().to_string(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }

    /// Merge freshly synced records for one hub into the store.
    ///
    /// Records for other hubs are preserved untouched. Within `hub_id`,
    /// existing assignees are updated in place and new assignees appended;
    /// assignees absent from `updates` are dropped (they no longer exist
    /// upstream).
    pub fn merge_hub(&mut self, hub_id: &str, updates: Vec<DriverRecord>) {
        self.drivers.retain(|d| d.hub_id != hub_id);
        self.drivers.extend(updates);
        self.drivers.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Fixed lookup map for a report run; no I/O per lookup.
    #[must_use]
    pub fn by_assignee(&self) -> HashMap<&str, &DriverRecord> {
        self.drivers
            .iter()
            .map(|d| (d.assignee_id.as_str(), d))
            .collect()
    }

    /// All records belonging to the given hub.
    #[must_use]
    pub fn for_hub(&self, hub_id: &str) -> Vec<&DriverRecord> {
        self.drivers.iter().filter(|d| d.hub_id == hub_id).collect()
    }
}
