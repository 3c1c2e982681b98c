//! Integration tests for `TaskClient` using wiremock HTTP mocks.

use kurir_api::{ApiError, TaskClient, TaskLabel};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TaskClient {
    TaskClient::with_base_url("test-token", 30, 500, base_url)
        .expect("client construction should not fail")
}

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().expect("valid test date")
}

#[tokio::test]
async fn list_tasks_returns_parsed_tasks() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "tasks": {
            "data": [
                {
                    "id": "t-1",
                    "assigneeId": "a-10",
                    "vehiclePlate": "D 8123 KA",
                    "customerName": "C0451 Toko Sumber Rejeki",
                    "plannedSequence": 3,
                    "arrivalTime": "2025-08-01T02:55:00Z",
                    "completionTime": "2025-08-01T03:05:30Z",
                    "openTime": "08:00",
                    "closeTime": "17:00",
                    "labels": ["DONE"],
                },
                {
                    "id": "t-2",
                    "assigneeId": "a-10",
                    "customerName": "Warung Bu Sri",
                    "labels": ["PENDING"],
                    "cancelReason": "stock habis",
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("hubId", "hub-601"))
        .and(query_param("timeFrom", "2025-08-01 00:00:00"))
        .and(query_param("timeTo", "2025-08-01 23:59:59"))
        .and(query_param("timeBy", "assigned"))
        .and(query_param("limit", "500"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let tasks = client
        .list_tasks(date("2025-08-01"), "hub-601")
        .await
        .expect("should parse tasks");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, "t-1");
    assert_eq!(tasks[0].planned_sequence, 3);
    assert_eq!(tasks[0].labels, vec![TaskLabel::Done]);
    assert_eq!(tasks[1].planned_sequence, 0, "missing plannedSequence defaults to 0");
    assert_eq!(tasks[1].cancel_reason.as_deref(), Some("stock habis"));
    assert!(tasks[1].completion_time.is_none());
}

#[tokio::test]
async fn list_tasks_maps_401_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_tasks(date("2025-08-01"), "hub-601")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Auth), "expected Auth, got: {err:?}");
}

#[tokio::test]
async fn list_tasks_maps_5xx_to_transient_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_tasks(date("2025-08-01"), "hub-601")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::TransientServer { status: 503 }),
        "expected TransientServer(503), got: {err:?}"
    );
}

#[tokio::test]
async fn list_tasks_empty_data_is_distinct_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "tasks": { "data": [] } });
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_tasks(date("2025-08-01"), "hub-601")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::EmptyResult { .. }),
        "expected EmptyResult, got: {err:?}"
    );
    assert!(err.to_string().contains("2025-08-01"));
}

#[tokio::test]
async fn list_route_results_returns_parsed_records() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "results": {
            "data": [
                {
                    "assigneeId": "a-10",
                    "driverName": "[DRY] Agus Salim",
                    "vehiclePlate": "D 8123 KA",
                    "tags": ["reguler"],
                    "weightUtilization": "85%",
                    "volumeUtilization": "72%",
                    "plannedStops": 18
                }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/results"))
        .and(query_param("s", "2025-08-01"))
        .and(query_param("hubId", "hub-601"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .list_route_results(date("2025-08-01"), "hub-601")
        .await
        .expect("should parse route results");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].driver_name, "[DRY] Agus Salim");
    assert_eq!(results[0].weight_utilization.as_deref(), Some("85%"));
    assert_eq!(results[0].planned_stops, Some(18));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "unexpected": true });
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_tasks(date("2025-08-01"), "hub-601")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}
