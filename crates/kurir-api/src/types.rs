//! Wire types for the delivery-management REST API.
//!
//! All types model the JSON structures the API actually returns. Both
//! endpoints wrap their rows in a nested `{"data": [...]}` envelope.

use chrono::{DateTime, Utc};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// GET /tasks
// ---------------------------------------------------------------------------

/// Top-level envelope for the `/tasks` response: `{ "tasks": { "data": [...] } }`.
#[derive(Debug, Deserialize)]
pub struct TasksResponse {
    pub tasks: TasksData,
}

#[derive(Debug, Deserialize)]
pub struct TasksData {
    #[serde(default)]
    pub data: Vec<TaskDto>,
}

/// One delivery stop attempt as returned by the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub assignee_id: String,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    /// Free text; may embed a customer code token.
    pub customer_name: String,
    /// Stop order assigned by the upstream planning system; absent when
    /// the task was never routed.
    #[serde(default)]
    pub planned_sequence: Option<u32>,
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_time: Option<DateTime<Utc>>,
    /// Local time-window strings, e.g. `"08:00"` / `"17:00"`.
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub etd: Option<String>,
    /// Status labels drawn from a fixed vocabulary; unknown entries are
    /// dropped (with a warning) during normalization.
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub cancel_reason: Option<String>,
    #[serde(default)]
    pub reject_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /results
// ---------------------------------------------------------------------------

/// Top-level envelope for the `/results` response.
#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    pub results: ResultsData,
}

#[derive(Debug, Deserialize)]
pub struct ResultsData {
    #[serde(default)]
    pub data: Vec<RouteResultDto>,
}

/// Routing/assignment record for one vehicle on one day.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResultDto {
    pub assignee_id: String,
    pub driver_name: String,
    pub vehicle_plate: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Percentage strings as sent on the wire, e.g. `"85%"`.
    #[serde(default)]
    pub weight_utilization: Option<String>,
    #[serde(default)]
    pub volume_utilization: Option<String>,
    #[serde(default)]
    pub planned_stops: Option<u32>,
}
