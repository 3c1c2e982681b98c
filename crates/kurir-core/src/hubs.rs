use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One branch location and the hub identifier the remote API knows it by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Short internal location code, e.g. `"BDG"`.
    pub location_code: String,
    /// The API-side hub identifier used in `hubId` query parameters.
    pub hub_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HubsFile {
    pub hubs: Vec<HubConfig>,
}

/// Fixed location-code → hub mapping, built once from [`HubsFile`].
#[derive(Debug, Clone)]
pub struct HubMap {
    by_code: HashMap<String, HubConfig>,
}

impl HubMap {
    #[must_use]
    pub fn new(hubs: Vec<HubConfig>) -> Self {
        let by_code = hubs
            .into_iter()
            .map(|h| (h.location_code.clone(), h))
            .collect();
        Self { by_code }
    }

    /// Resolve a location code to its hub mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLocation`] if the code has no entry.
    pub fn resolve(&self, location_code: &str) -> Result<&HubConfig, ConfigError> {
        self.by_code
            .get(location_code)
            .ok_or_else(|| ConfigError::UnknownLocation(location_code.to_string()))
    }
}

/// Load and validate the hub mapping from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_hubs(path: &Path) -> Result<HubMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HubsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let hubs_file: HubsFile = serde_yaml::from_str(&content)?;
    validate_hubs(&hubs_file)?;

    Ok(HubMap::new(hubs_file.hubs))
}

fn validate_hubs(hubs_file: &HubsFile) -> Result<(), ConfigError> {
    let mut seen_codes = HashSet::new();

    for hub in &hubs_file.hubs {
        if hub.location_code.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location code must be non-empty".to_string(),
            ));
        }
        if hub.hub_id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "hub id for location '{}' must be non-empty",
                hub.location_code
            )));
        }
        if !seen_codes.insert(hub.location_code.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate location code: '{}'",
                hub.location_code
            )));
        }
    }

    Ok(())
}
