use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Fixed liveness payload; touches no other component.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "ATS Resume Analyzer"
    }))
}
