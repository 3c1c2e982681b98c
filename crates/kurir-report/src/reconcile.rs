//! Realized visit-sequence reconstruction.
//!
//! The planning system assigns each stop a planned sequence; drivers do
//! not always follow it. This module rebuilds the order in which stops
//! were actually completed and tags each stop as matching or deviating
//! from the plan.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kurir_api::Task;

/// Whether the realized rank agrees with the planned sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTag {
    Match,
    Mismatch,
}

impl std::fmt::Display for SequenceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceTag::Match => write!(f, "MATCH"),
            SequenceTag::Mismatch => write!(f, "MISMATCH"),
        }
    }
}

/// A task annotated with its realized rank and derived timing.
#[derive(Debug, Clone)]
pub struct RealizedStop {
    pub task: Task,
    /// 1-based position in the completion order for this assignee.
    pub realized_sequence: u32,
    pub sequence_tag: SequenceTag,
    /// Whole minutes between arrival and completion, both truncated to
    /// the minute before subtracting. Absent when either timestamp is
    /// missing or completion precedes arrival.
    pub visit_minutes: Option<i64>,
}

/// Sort key for completion order: tasks without a completion timestamp
/// sort after every task that has one, via a maximal sentinel rather than
/// the current time, so the ordering is independent of when the report
/// runs.
fn completion_key(task: &Task) -> DateTime<Utc> {
    task.completion_time.unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn visit_minutes(task: &Task) -> Option<i64> {
    let arrival = task.arrival_time?;
    let completion = task.completion_time?;
    // Truncate to the minute first, then subtract; seconds never
    // contribute to the duration.
    let minutes = completion.timestamp().div_euclid(60) - arrival.timestamp().div_euclid(60);
    if minutes < 0 {
        return None;
    }
    Some(minutes)
}

/// Partition tasks by assignee and assign each a 1-based realized rank in
/// completion order.
///
/// The sort is stable: two tasks sharing a completion timestamp keep
/// their original input order, so the assignment is fully deterministic
/// for a fixed input.
#[must_use]
pub fn reconcile(tasks: Vec<Task>) -> HashMap<String, Vec<RealizedStop>> {
    let mut partitions: HashMap<String, Vec<Task>> = HashMap::new();
    for task in tasks {
        partitions
            .entry(task.assignee_id.clone())
            .or_default()
            .push(task);
    }

    partitions
        .into_iter()
        .map(|(assignee, mut group)| {
            group.sort_by_key(completion_key);
            let stops = group
                .into_iter()
                .enumerate()
                .map(|(i, task)| {
                    let realized_sequence = u32::try_from(i + 1).unwrap_or(u32::MAX);
                    let sequence_tag = if realized_sequence == task.planned_sequence {
                        SequenceTag::Match
                    } else {
                        SequenceTag::Mismatch
                    };
                    let visit_minutes = visit_minutes(&task);
                    RealizedStop {
                        task,
                        realized_sequence,
                        sequence_tag,
                        visit_minutes,
                    }
                })
                .collect();
            (assignee, stops)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ts(hms: (u32, u32, u32)) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, hms.0, hms.1, hms.2).unwrap()
    }

    fn task(id: &str, assignee: &str, planned: u32, completion: Option<DateTime<Utc>>) -> Task {
        Task {
            id: id.to_string(),
            assignee_id: assignee.to_string(),
            vehicle_plate: None,
            customer_name: "Toko Jaya".to_string(),
            planned_sequence: planned,
            arrival_time: None,
            completion_time: completion,
            open_time: None,
            close_time: None,
            eta: None,
            etd: None,
            labels: vec![],
            cancel_reason: None,
            reject_reason: None,
        }
    }

    #[test]
    fn realized_order_follows_completion_timestamps() {
        // Input order [10:05, 10:02]; the 10:02 task must get rank 1.
        let tasks = vec![
            task("t1", "a", 1, Some(ts((10, 5, 0)))),
            task("t2", "a", 2, Some(ts((10, 2, 0)))),
        ];
        let result = reconcile(tasks);
        let stops = &result["a"];
        assert_eq!(stops[0].task.id, "t2");
        assert_eq!(stops[0].realized_sequence, 1);
        assert_eq!(stops[1].task.id, "t1");
        assert_eq!(stops[1].realized_sequence, 2);
    }

    #[test]
    fn ranks_are_a_permutation_of_one_to_n() {
        let tasks = vec![
            task("t1", "a", 1, Some(ts((9, 0, 0)))),
            task("t2", "a", 2, None),
            task("t3", "a", 3, Some(ts((8, 0, 0)))),
            task("t4", "a", 4, Some(ts((10, 0, 0)))),
        ];
        let result = reconcile(tasks);
        let mut ranks: Vec<u32> = result["a"].iter().map(|s| s.realized_sequence).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn missing_completion_sorts_after_all_completed() {
        let tasks = vec![
            task("t1", "a", 1, None),
            task("t2", "a", 2, Some(ts((23, 59, 59)))),
        ];
        let result = reconcile(tasks);
        let stops = &result["a"];
        assert_eq!(stops[0].task.id, "t2");
        assert_eq!(stops[1].task.id, "t1");
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let same = Some(ts((12, 0, 0)));
        let tasks = vec![
            task("t1", "a", 1, same),
            task("t2", "a", 2, same),
            task("t3", "a", 3, same),
        ];
        let result = reconcile(tasks);
        let ids: Vec<&str> = result["a"].iter().map(|s| s.task.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn sequence_tag_match_and_mismatch() {
        let tasks = vec![
            task("t1", "a", 1, Some(ts((9, 0, 0)))),
            task("t2", "a", 5, Some(ts((10, 0, 0)))),
        ];
        let result = reconcile(tasks);
        assert_eq!(result["a"][0].sequence_tag, SequenceTag::Match);
        assert_eq!(result["a"][1].sequence_tag, SequenceTag::Mismatch);
    }

    #[test]
    fn partitions_are_per_assignee() {
        let tasks = vec![
            task("t1", "a", 1, Some(ts((9, 0, 0)))),
            task("t2", "b", 1, Some(ts((8, 0, 0)))),
        ];
        let result = reconcile(tasks);
        assert_eq!(result["a"].len(), 1);
        assert_eq!(result["b"].len(), 1);
        assert_eq!(result["a"][0].realized_sequence, 1);
        assert_eq!(result["b"][0].realized_sequence, 1);
    }

    #[test]
    fn visit_minutes_truncates_seconds_before_subtracting() {
        // 08:59:50 -> 09:01:05 is 1:15 wall-clock but 2 whole minutes
        // after truncation (08:59 -> 09:01).
        let mut t = task("t1", "a", 1, Some(ts((9, 1, 5))));
        t.arrival_time = Some(ts((8, 59, 50)));
        let result = reconcile(vec![t]);
        assert_eq!(result["a"][0].visit_minutes, Some(2));
    }

    #[test]
    fn visit_minutes_absent_when_arrival_missing() {
        let t = task("t1", "a", 1, Some(ts((9, 0, 0))));
        let result = reconcile(vec![t]);
        assert_eq!(result["a"][0].visit_minutes, None);
    }

    #[test]
    fn visit_minutes_absent_when_completion_precedes_arrival() {
        let mut t = task("t1", "a", 1, Some(ts((8, 0, 0))));
        t.arrival_time = Some(ts((9, 0, 0)));
        let result = reconcile(vec![t]);
        assert_eq!(result["a"][0].visit_minutes, None);
    }
}
