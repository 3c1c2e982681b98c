//! Exception bucketing for undelivered tasks.

use std::sync::LazyLock;

use kurir_api::{Task, TaskLabel};
use regex::Regex;

use crate::resolver::{temperature_tag, DriverResolver, TempTag};

/// Literal marker emitted when no customer code can be extracted.
pub const CODE_NOT_FOUND: &str = "N/A";

/// Contiguous `C0` + digits token embedded in customer names.
static CUSTOMER_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"C0[0-9]+").expect("customer code pattern is valid"));

/// Classification bucket for a task carrying an undelivered-class label.
///
/// Buckets are mutually exclusive; when multiple labels are present the
/// highest-priority one wins: Cancelled > PartiallyReceived > Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionBucket {
    Cancelled,
    PartiallyReceived,
    Pending,
}

impl std::fmt::Display for ExceptionBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExceptionBucket::Cancelled => write!(f, "CANCELLED"),
            ExceptionBucket::PartiallyReceived => write!(f, "PARTIALLY-RECEIVED"),
            ExceptionBucket::Pending => write!(f, "PENDING"),
        }
    }
}

/// One row in the exception table.
#[derive(Debug, Clone)]
pub struct ExceptionRecord {
    pub task_id: String,
    pub driver_name: String,
    pub customer_name: String,
    pub customer_code: String,
    pub bucket: ExceptionBucket,
    pub reason: String,
    pub temp_tag: TempTag,
}

/// Extracts the first `C0`-prefixed token from a customer name.
///
/// Pure function of the input string; a name without a matching token
/// always yields the literal [`CODE_NOT_FOUND`] marker.
#[must_use]
pub fn customer_code(customer_name: &str) -> String {
    CUSTOMER_CODE
        .find(customer_name)
        .map_or_else(|| CODE_NOT_FOUND.to_string(), |m| m.as_str().to_string())
}

/// Picks the exception bucket for a label set, or `None` when the task
/// carries no undelivered-class label.
#[must_use]
pub fn bucket_for(labels: &[TaskLabel]) -> Option<ExceptionBucket> {
    if labels.contains(&TaskLabel::Cancelled) {
        Some(ExceptionBucket::Cancelled)
    } else if labels.contains(&TaskLabel::PartiallyReceived) {
        Some(ExceptionBucket::PartiallyReceived)
    } else if labels.contains(&TaskLabel::Pending) {
        Some(ExceptionBucket::Pending)
    } else {
        None
    }
}

/// Classifies one task, or `None` when it was delivered cleanly.
///
/// Reason text comes from the cancellation field for Cancelled and
/// Pending buckets, and from the rejection field for PartiallyReceived.
#[must_use]
pub fn classify_task(task: &Task, resolver: &DriverResolver) -> Option<ExceptionRecord> {
    let bucket = bucket_for(&task.labels)?;
    let reason = match bucket {
        ExceptionBucket::Cancelled | ExceptionBucket::Pending => task.cancel_reason.clone(),
        ExceptionBucket::PartiallyReceived => task.reject_reason.clone(),
    }
    .unwrap_or_default();

    let driver_name = resolver.resolve(&task.assignee_id);
    let temp_tag = temperature_tag(&driver_name);

    Some(ExceptionRecord {
        task_id: task.id.clone(),
        driver_name,
        customer_name: task.customer_name.clone(),
        customer_code: customer_code(&task.customer_name),
        bucket,
        reason,
        temp_tag,
    })
}

/// Classifies every undelivered task, sorted by driver name ascending.
#[must_use]
pub fn classify_all(tasks: &[Task], resolver: &DriverResolver) -> Vec<ExceptionRecord> {
    let mut records: Vec<ExceptionRecord> = tasks
        .iter()
        .filter_map(|t| classify_task(t, resolver))
        .collect();
    records.sort_by(|a, b| a.driver_name.cmp(&b.driver_name));
    records
}

#[cfg(test)]
mod tests {
    use kurir_core::DriverStore;

    use super::*;

    fn task_with(labels: Vec<TaskLabel>, customer: &str) -> Task {
        Task {
            id: "t1".to_string(),
            assignee_id: "a-10".to_string(),
            vehicle_plate: None,
            customer_name: customer.to_string(),
            planned_sequence: 0,
            arrival_time: None,
            completion_time: None,
            open_time: None,
            close_time: None,
            eta: None,
            etd: None,
            labels,
            cancel_reason: Some("stock habis".to_string()),
            reject_reason: Some("barang rusak".to_string()),
        }
    }

    fn empty_resolver() -> DriverResolver {
        DriverResolver::new(&DriverStore::default())
    }

    #[test]
    fn cancelled_beats_pending() {
        let bucket = bucket_for(&[TaskLabel::Pending, TaskLabel::Cancelled]);
        assert_eq!(bucket, Some(ExceptionBucket::Cancelled));
    }

    #[test]
    fn partial_beats_pending() {
        let bucket = bucket_for(&[TaskLabel::Pending, TaskLabel::PartiallyReceived]);
        assert_eq!(bucket, Some(ExceptionBucket::PartiallyReceived));
    }

    #[test]
    fn done_only_is_not_an_exception() {
        assert_eq!(bucket_for(&[TaskLabel::Done]), None);
        assert_eq!(bucket_for(&[]), None);
    }

    #[test]
    fn customer_code_first_match() {
        assert_eq!(customer_code("C0451 Toko Sumber Rejeki"), "C0451");
        assert_eq!(customer_code("retur C0012 dan C099"), "C0012");
    }

    #[test]
    fn customer_code_not_found_marker() {
        assert_eq!(customer_code("Warung Bu Sri"), CODE_NOT_FOUND);
        // C must be followed by a literal 0 and at least one more digit.
        assert_eq!(customer_code("C12 Toko"), CODE_NOT_FOUND);
        assert_eq!(customer_code("C0 Toko"), CODE_NOT_FOUND);
    }

    #[test]
    fn customer_code_is_idempotent() {
        let name = "C0451 Toko Sumber Rejeki";
        let first = customer_code(name);
        let second = customer_code(name);
        assert_eq!(first, second);
    }

    #[test]
    fn pending_reason_comes_from_cancellation_field() {
        let task = task_with(vec![TaskLabel::Pending], "Warung Bu Sri");
        let record = classify_task(&task, &empty_resolver()).unwrap();
        assert_eq!(record.bucket, ExceptionBucket::Pending);
        assert_eq!(record.reason, "stock habis");
        assert_eq!(record.customer_code, CODE_NOT_FOUND);
    }

    #[test]
    fn partial_reason_comes_from_rejection_field() {
        let task = task_with(vec![TaskLabel::PartiallyReceived], "C0007 Toko Abadi");
        let record = classify_task(&task, &empty_resolver()).unwrap();
        assert_eq!(record.reason, "barang rusak");
        assert_eq!(record.customer_code, "C0007");
    }

    #[test]
    fn unresolved_driver_gets_na_temperature() {
        let task = task_with(vec![TaskLabel::Pending], "Warung Bu Sri");
        let record = classify_task(&task, &empty_resolver()).unwrap();
        assert_eq!(record.driver_name, "a-10");
        assert_eq!(record.temp_tag, TempTag::Na);
    }

    #[test]
    fn classify_all_sorts_by_driver_name() {
        let mut t1 = task_with(vec![TaskLabel::Pending], "X");
        t1.assignee_id = "zulfikar".to_string();
        let mut t2 = task_with(vec![TaskLabel::Pending], "Y");
        t2.assignee_id = "agus".to_string();
        let records = classify_all(&[t1, t2], &empty_resolver());
        assert_eq!(records[0].driver_name, "agus");
        assert_eq!(records[1].driver_name, "zulfikar");
    }
}
