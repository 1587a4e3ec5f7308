//! Handlers for the classified readings listing.
//!
//! Both listings serve the startup snapshot as-is: every row is a mapping of
//! column name to value in the dataset file's column order.

use axum::extract::State;
use axum::Json;
use battmon_db::Record;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// GET /
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Battery Monitoring API is running",
    })
}

/// GET /data
///
/// Every classified reading, in file order.
pub async fn list_readings(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.dataset.rows().to_vec())
}

/// GET /anomalies
///
/// Readings with `final_anomaly == 1`, in file order.
pub async fn list_anomalies(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.dataset.anomalies().cloned().collect())
}
