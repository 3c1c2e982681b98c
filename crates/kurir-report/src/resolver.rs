//! Driver name resolution against the reference table.

use std::collections::HashMap;

use kurir_core::DriverStore;

/// Temperature class derived from the bracketed prefix drivers carry in
/// their display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempTag {
    Dry,
    Frozen,
    Na,
}

impl std::fmt::Display for TempTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TempTag::Dry => write!(f, "DRY"),
            TempTag::Frozen => write!(f, "FRZ"),
            TempTag::Na => write!(f, "N/A"),
        }
    }
}

/// Derives the temperature tag from a resolved driver name.
///
/// Driver names are expected to begin with a bracketed temperature code
/// (`"[DRY] Agus"`); anything else maps to [`TempTag::Na`].
#[must_use]
pub fn temperature_tag(driver_name: &str) -> TempTag {
    let trimmed = driver_name.trim_start();
    if trimmed.starts_with("[DRY]") {
        TempTag::Dry
    } else if trimmed.starts_with("[FRZ]") {
        TempTag::Frozen
    } else {
        TempTag::Na
    }
}

/// Fixed assignee-id → display-name mapping, built once per run from the
/// reference store. Lookups never fail and never touch I/O: an unknown
/// assignee resolves to its raw identifier verbatim.
pub struct DriverResolver {
    names: HashMap<String, String>,
    plates: HashMap<String, String>,
}

impl DriverResolver {
    #[must_use]
    pub fn new(store: &DriverStore) -> Self {
        let mut names = HashMap::new();
        let mut plates = HashMap::new();
        for record in &store.drivers {
            names.insert(record.assignee_id.clone(), record.name.clone());
            plates.insert(record.assignee_id.clone(), record.plate.clone());
        }
        Self { names, plates }
    }

    /// Resolve an assignee id to its display name, degrading to the raw
    /// id when no reference record exists.
    #[must_use]
    pub fn resolve(&self, assignee_id: &str) -> String {
        self.names
            .get(assignee_id)
            .cloned()
            .unwrap_or_else(|| assignee_id.to_string())
    }

    /// Vehicle plate for the assignee, when the reference table has one.
    #[must_use]
    pub fn plate(&self, assignee_id: &str) -> Option<&str> {
        self.plates.get(assignee_id).map(String::as_str)
    }
}
