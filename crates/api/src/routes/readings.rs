use axum::routing::get;
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// Read-only dataset routes, mounted at the root.
///
/// ```text
/// GET /            -> root
/// GET /data        -> list_readings
/// GET /anomalies   -> list_anomalies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(readings::root))
        .route("/data", get(readings::list_readings))
        .route("/anomalies", get(readings::list_anomalies))
}
