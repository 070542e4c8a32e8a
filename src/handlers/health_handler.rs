use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::AppState;

pub async fn health_checker_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "manhwa-api",
    }))
}

pub async fn db_health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.db.test_connection().await {
        Ok(()) => Ok(Json(json!({ "database": "ok" }))),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
