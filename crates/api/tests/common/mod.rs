#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use battmon_api::config::ServerConfig;
use battmon_api::router::build_app_router;
use battmon_api::state::AppState;
use battmon_db::Dataset;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Classified dataset with two anomalies out of four rows.
pub const SAMPLE_DATASET: &str = "\
timestamp,voltage,temperature,rule_anomaly,ml_anomaly,final_anomaly
2024-01-01 00:00:00,50.0,24.0,0,0,0
2024-01-01 00:01:00,53.0,24.0,1,0,1
2024-01-01 00:02:00,50.2,23.5,0,0,0
2024-01-01 00:03:00,49.1,21.0,0,1,1
";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        dataset_path: "ml_output.csv".into(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub fn dataset(csv_text: &str) -> Dataset {
    Dataset::from_reader(csv::Reader::from_reader(csv_text.as_bytes())).unwrap()
}

/// Build the full application router over an in-memory dataset, with the
/// same middleware stack production uses.
pub fn build_test_app(csv_text: &str) -> Router {
    let config = test_config();
    let state = AppState::new(dataset(csv_text), config.clone());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
