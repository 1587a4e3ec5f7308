//! Integration tests for the root message and the dataset listings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, SAMPLE_DATASET};
use serde_json::{json, Value};

fn as_rows(json: Value) -> Vec<Value> {
    json.as_array().expect("listing must be a JSON array").clone()
}

// ---------------------------------------------------------------------------
// Test: GET / returns the static status message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_returns_status_message() {
    let app = common::build_test_app(SAMPLE_DATASET);
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Battery Monitoring API is running" })
    );
}

// ---------------------------------------------------------------------------
// Test: GET /data returns every row in file order with typed values
// ---------------------------------------------------------------------------

#[tokio::test]
async fn data_lists_every_row_in_file_order() {
    let app = common::build_test_app(SAMPLE_DATASET);
    let response = get(app, "/data").await;

    assert_eq!(response.status(), StatusCode::OK);

    let rows = as_rows(body_json(response).await);
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0],
        json!({
            "timestamp": "2024-01-01 00:00:00",
            "voltage": 50.0,
            "temperature": 24.0,
            "rule_anomaly": 0,
            "ml_anomaly": 0,
            "final_anomaly": 0
        })
    );
    let stamps: Vec<&str> = rows.iter().map(|r| r["timestamp"].as_str().unwrap()).collect();
    assert_eq!(
        stamps,
        [
            "2024-01-01 00:00:00",
            "2024-01-01 00:01:00",
            "2024-01-01 00:02:00",
            "2024-01-01 00:03:00"
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: GET /anomalies is the final_anomaly == 1 subset of GET /data
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anomalies_are_flagged_subset_of_data() {
    let data = as_rows(body_json(get(common::build_test_app(SAMPLE_DATASET), "/data").await).await);
    let anomalies =
        as_rows(body_json(get(common::build_test_app(SAMPLE_DATASET), "/anomalies").await).await);

    assert_eq!(anomalies.len(), 2);
    assert!(anomalies.iter().all(|r| r["final_anomaly"] == 1));
    assert!(anomalies.iter().all(|r| data.contains(r)));

    let expected: Vec<&Value> = data.iter().filter(|r| r["final_anomaly"] == 1).collect();
    let actual: Vec<&Value> = anomalies.iter().collect();
    assert_eq!(actual, expected);
}

// ---------------------------------------------------------------------------
// Test: empty dataset serves empty listings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_dataset_serves_empty_arrays() {
    let header = "timestamp,voltage,temperature,rule_anomaly,ml_anomaly,final_anomaly\n";

    let data = body_json(get(common::build_test_app(header), "/data").await).await;
    let anomalies = body_json(get(common::build_test_app(header), "/anomalies").await).await;

    assert_eq!(data, json!([]));
    assert_eq!(anomalies, json!([]));
}
