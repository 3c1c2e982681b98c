//! Normalization of wire types into domain records for the report pipeline.

use chrono::{DateTime, Utc};

use crate::types::{RouteResultDto, TaskDto};

/// Status labels the pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLabel {
    Done,
    Pending,
    Cancelled,
    PartiallyReceived,
}

impl TaskLabel {
    /// True for labels that mark a task as not successfully delivered.
    #[must_use]
    pub fn is_undelivered(self) -> bool {
        !matches!(self, TaskLabel::Done)
    }
}

impl std::fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskLabel::Done => write!(f, "DONE"),
            TaskLabel::Pending => write!(f, "PENDING"),
            TaskLabel::Cancelled => write!(f, "CANCELLED"),
            TaskLabel::PartiallyReceived => write!(f, "PARTIALLY-RECEIVED"),
        }
    }
}

/// Parses a wire label string. Returns `None` for anything outside the
/// fixed vocabulary; the caller decides whether to warn.
#[must_use]
pub fn parse_label(raw: &str) -> Option<TaskLabel> {
    match raw.to_ascii_uppercase().as_str() {
        "DONE" => Some(TaskLabel::Done),
        "PENDING" => Some(TaskLabel::Pending),
        "CANCELLED" => Some(TaskLabel::Cancelled),
        "PARTIALLY-RECEIVED" => Some(TaskLabel::PartiallyReceived),
        _ => None,
    }
}

/// A delivery stop attempt, normalized for the report pipeline.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub assignee_id: String,
    pub vehicle_plate: Option<String>,
    pub customer_name: String,
    /// Defaults to 0 when the planning system supplied none.
    pub planned_sequence: u32,
    pub arrival_time: Option<DateTime<Utc>>,
    pub completion_time: Option<DateTime<Utc>>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub eta: Option<String>,
    pub etd: Option<String>,
    pub labels: Vec<TaskLabel>,
    pub cancel_reason: Option<String>,
    pub reject_reason: Option<String>,
}

impl Task {
    /// True if any label marks this task as not successfully delivered.
    #[must_use]
    pub fn is_undelivered(&self) -> bool {
        self.labels.iter().any(|l| l.is_undelivered())
    }
}

/// Routing/assignment record for one vehicle, normalized.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub assignee_id: String,
    pub driver_name: String,
    pub vehicle_plate: String,
    pub tags: Vec<String>,
    pub weight_utilization: Option<String>,
    pub volume_utilization: Option<String>,
    pub planned_stops: Option<u32>,
}

/// Converts a [`TaskDto`] into a [`Task`], dropping unrecognized labels
/// with a warning.
#[must_use]
pub fn normalize_task(dto: TaskDto) -> Task {
    let labels = dto
        .labels
        .iter()
        .filter_map(|raw| {
            let parsed = parse_label(raw);
            if parsed.is_none() {
                tracing::warn!(task = %dto.id, label = %raw, "dropping unrecognized task label");
            }
            parsed
        })
        .collect();

    Task {
        id: dto.id,
        assignee_id: dto.assignee_id,
        vehicle_plate: dto.vehicle_plate,
        customer_name: dto.customer_name,
        planned_sequence: dto.planned_sequence.unwrap_or(0),
        arrival_time: dto.arrival_time,
        completion_time: dto.completion_time,
        open_time: dto.open_time,
        close_time: dto.close_time,
        eta: dto.eta,
        etd: dto.etd,
        labels,
        cancel_reason: dto.cancel_reason,
        reject_reason: dto.reject_reason,
    }
}

#[must_use]
pub fn normalize_route_result(dto: RouteResultDto) -> RouteResult {
    RouteResult {
        assignee_id: dto.assignee_id,
        driver_name: dto.driver_name,
        vehicle_plate: dto.vehicle_plate,
        tags: dto.tags,
        weight_utilization: dto.weight_utilization,
        volume_utilization: dto.volume_utilization,
        planned_stops: dto.planned_stops,
    }
}
