//! The three report generators.
//!
//! Each takes already-fetched domain records and produces a [`Report`]
//! whose sheet names and column order are part of the output contract.

use chrono::{DateTime, Utc};
use kurir_api::{RouteResult, Task};
use kurir_core::DriverRecord;

use crate::aggregate::{reconciliation_groups, summarize};
use crate::classify::classify_all;
use crate::reconcile::reconcile;
use crate::resolver::DriverResolver;
use crate::table::{Report, Sheet};

/// Rendering of the per-driver "no data" sentinel.
const NO_DATA: &str = "No Data";

fn fmt_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

fn fmt_opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Per-driver delivery totals: sheet "Total Delivered".
///
/// `seed` is the reference table slice for the active hub; drivers with
/// no observed tasks appear with the no-data sentinel, not zeros.
#[must_use]
pub fn delivered_report(
    date_label: &str,
    tasks: &[Task],
    resolver: &DriverResolver,
    seed: &[&DriverRecord],
) -> Report {
    let mut sheet = Sheet::new("Total Delivered", &["Driver", "Total Visit", "Total Delivered"]);
    for summary in summarize(tasks, resolver, seed) {
        let (visits, delivered) = match summary.counts {
            Some(c) => (c.visits.to_string(), c.delivered.to_string()),
            None => (NO_DATA.to_string(), NO_DATA.to_string()),
        };
        sheet.push_row(vec![summary.driver_name, visits, delivered]);
    }

    Report {
        title: format!("Total Delivered {date_label}"),
        sheets: vec![sheet],
    }
}

/// Undelivered-task exceptions: sheet "Hasil Pending SO".
#[must_use]
pub fn pending_so_report(date_label: &str, tasks: &[Task], resolver: &DriverResolver) -> Report {
    let mut sheet = Sheet::new(
        "Hasil Pending SO",
        &["Driver", "Customer", "Customer Code", "Bucket", "Reason", "Temperature"],
    );
    for record in classify_all(tasks, resolver) {
        sheet.push_row(vec![
            record.driver_name,
            record.customer_name,
            record.customer_code,
            record.bucket.to_string(),
            record.reason,
            record.temp_tag.to_string(),
        ]);
    }

    Report {
        title: format!("Hasil Pending SO {date_label}"),
        sheets: vec![sheet],
    }
}

/// Planned-versus-realized reconciliation: sheet "Hasil RO vs Real" plus
/// a per-vehicle utilization sheet from the routing results.
///
/// The reconciliation sheet is grouped by driver with one blank separator
/// row strictly between groups — never leading or trailing.
#[must_use]
pub fn ro_vs_real_report(
    date_label: &str,
    tasks: Vec<Task>,
    route_results: &[RouteResult],
    resolver: &DriverResolver,
) -> Report {
    let mut recon = Sheet::new(
        "Hasil RO vs Real",
        &[
            "Driver",
            "Customer",
            "Status",
            "Planned Seq",
            "Real Seq",
            "Seq Check",
            "Arrival",
            "Completion",
            "Duration (min)",
            "Open",
            "Close",
            "ETA",
            "ETD",
        ],
    );

    let groups = reconciliation_groups(reconcile(tasks), resolver);
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            recon.push_separator();
        }
        for stop in &group.stops {
            let task = &stop.task;
            let status = task
                .labels
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            recon.push_row(vec![
                group.driver_name.clone(),
                task.customer_name.clone(),
                status,
                task.planned_sequence.to_string(),
                stop.realized_sequence.to_string(),
                stop.sequence_tag.to_string(),
                fmt_time(task.arrival_time),
                fmt_time(task.completion_time),
                stop.visit_minutes.map(|m| m.to_string()).unwrap_or_default(),
                fmt_opt(task.open_time.as_ref()),
                fmt_opt(task.close_time.as_ref()),
                fmt_opt(task.eta.as_ref()),
                fmt_opt(task.etd.as_ref()),
            ]);
        }
    }

    let mut util = Sheet::new(
        "Utilisasi Kendaraan",
        &["Driver", "Plate", "Tags", "Weight Util", "Volume Util", "Planned Stops"],
    );
    let mut sorted: Vec<&RouteResult> = route_results.iter().collect();
    sorted.sort_by(|a, b| a.driver_name.cmp(&b.driver_name));
    for result in sorted {
        util.push_row(vec![
            result.driver_name.clone(),
            result.vehicle_plate.clone(),
            result.tags.join(","),
            fmt_opt(result.weight_utilization.as_ref()),
            fmt_opt(result.volume_utilization.as_ref()),
            result.planned_stops.map(|n| n.to_string()).unwrap_or_default(),
        ]);
    }

    Report {
        title: format!("Hasil RO vs Real {date_label}"),
        sheets: vec![recon, util],
    }
}
