// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// The landing page itself is rendered by the front; the root route only
/// reports that the service is up.
pub async fn landing() -> impl IntoResponse {
    Json(json!({
        "service": "podotest",
        "status": "ok",
    }))
}
