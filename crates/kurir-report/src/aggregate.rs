//! Per-driver aggregation and the grouped reconciliation table.

use std::collections::BTreeMap;
use std::collections::HashMap;

use kurir_api::Task;
use kurir_core::DriverRecord;

use crate::reconcile::RealizedStop;
use crate::resolver::DriverResolver;

/// Visit/delivery counters for one driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub visits: u32,
    pub delivered: u32,
}

/// Summary line for one driver. `counts` is `None` for a driver known in
/// the reference table with no observed tasks — "no data", not zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSummary {
    pub driver_name: String,
    pub counts: Option<Counts>,
}

/// Builds the per-driver summary.
///
/// Every reference driver in `seed` starts at the no-data sentinel; each
/// observed task then counts one visit and, unless the task carries an
/// undelivered-class label, one delivery. Output is sorted by display
/// name ascending.
#[must_use]
pub fn summarize(
    tasks: &[Task],
    resolver: &DriverResolver,
    seed: &[&DriverRecord],
) -> Vec<DriverSummary> {
    let mut by_name: BTreeMap<String, Option<Counts>> = seed
        .iter()
        .map(|record| (record.name.clone(), None))
        .collect();

    for task in tasks {
        let name = resolver.resolve(&task.assignee_id);
        let counts = by_name.entry(name).or_insert(None).get_or_insert_default();
        counts.visits += 1;
        if !task.is_undelivered() {
            counts.delivered += 1;
        }
    }

    by_name
        .into_iter()
        .map(|(driver_name, counts)| DriverSummary {
            driver_name,
            counts,
        })
        .collect()
}

/// One driver's stops in realized order, ready for flattening.
#[derive(Debug, Clone)]
pub struct DriverGroup {
    pub driver_name: String,
    pub stops: Vec<RealizedStop>,
}

/// Orders reconciled partitions into display groups: drivers ascending by
/// display name, stops ascending by realized sequence within each group.
#[must_use]
pub fn reconciliation_groups(
    reconciled: HashMap<String, Vec<RealizedStop>>,
    resolver: &DriverResolver,
) -> Vec<DriverGroup> {
    let mut groups: Vec<DriverGroup> = reconciled
        .into_iter()
        .map(|(assignee_id, mut stops)| {
            stops.sort_by_key(|s| s.realized_sequence);
            DriverGroup {
                driver_name: resolver.resolve(&assignee_id),
                stops,
            }
        })
        .collect();
    groups.sort_by(|a, b| a.driver_name.cmp(&b.driver_name));
    groups
}
