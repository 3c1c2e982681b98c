//! HTTP client for the delivery-management REST API.
//!
//! Wraps `reqwest` with bearer-token auth, a short connect/read timeout,
//! and typed response deserialization. Status codes are mapped onto the
//! [`ApiError`] taxonomy before any body parsing happens.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};

use crate::error::ApiError;
use crate::normalize::{normalize_route_result, normalize_task, RouteResult, Task};
use crate::types::{ResultsResponse, TasksResponse};

const DEFAULT_BASE_URL: &str = "https://api.mile.app/api/v3/";

/// Client for the delivery-management REST API.
///
/// Manages the HTTP client, bearer token, base URL, and the single-request
/// page cap. Use [`TaskClient::new`] for production or
/// [`TaskClient::with_base_url`] to point at a mock server in tests.
pub struct TaskClient {
    client: Client,
    token: String,
    base_url: Url,
    limit: u32,
}

impl TaskClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64, limit: u32) -> Result<Self, ApiError> {
        Self::with_base_url(token, timeout_secs, limit, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        limit: u32,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("kurir/0.1 (delivery-reporting)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
            limit,
        })
    }

    /// Fetches all delivery tasks assigned on `date` for the given hub.
    ///
    /// Applies a server-side window covering the full local day and a
    /// fixed page cap; there is no pagination loop, so a day with more
    /// rows than the cap loses the overflow.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Auth`] on HTTP 401.
    /// - [`ApiError::TransientServer`] on a 5xx status.
    /// - [`ApiError::EmptyResult`] when the day has no tasks.
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn list_tasks(&self, date: NaiveDate, hub_id: &str) -> Result<Vec<Task>, ApiError> {
        let time_from = format!("{} 00:00:00", date.format("%Y-%m-%d"));
        let time_to = format!("{} 23:59:59", date.format("%Y-%m-%d"));
        let limit = self.limit.to_string();
        let url = self.build_url(
            "tasks",
            &[
                ("status", "all"),
                ("hubId", hub_id),
                ("timeFrom", &time_from),
                ("timeTo", &time_to),
                ("timeBy", "assigned"),
                ("limit", &limit),
            ],
        )?;

        let body = self.request_json(&url).await?;
        let envelope: TasksResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: format!("tasks(date={date}, hubId={hub_id})"),
                source: e,
            })?;

        if envelope.tasks.data.is_empty() {
            return Err(ApiError::EmptyResult {
                context: format!("tasks on {date} at hub {hub_id}"),
            });
        }

        Ok(envelope.tasks.data.into_iter().map(normalize_task).collect())
    }

    /// Fetches the routing/assignment results for `date` at the given hub.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`TaskClient::list_tasks`].
    pub async fn list_route_results(
        &self,
        date: NaiveDate,
        hub_id: &str,
    ) -> Result<Vec<RouteResult>, ApiError> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let limit = self.limit.to_string();
        let url = self.build_url(
            "results",
            &[("s", &date_str), ("hubId", hub_id), ("limit", &limit)],
        )?;

        let body = self.request_json(&url).await?;
        let envelope: ResultsResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: format!("results(s={date_str}, hubId={hub_id})"),
                source: e,
            })?;

        if envelope.results.data.is_empty() {
            return Err(ApiError::EmptyResult {
                context: format!("route results on {date_str} at hub {hub_id}"),
            });
        }

        Ok(envelope
            .results
            .data
            .into_iter()
            .map(normalize_route_result)
            .collect())
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ApiError::Api(format!("invalid endpoint '{endpoint}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, maps the HTTP status onto the error taxonomy,
    /// and parses the response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth);
        }
        if status.is_server_error() {
            return Err(ApiError::TransientServer {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Api(format!(
                "unexpected HTTP status {status} from {}",
                url.path()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
