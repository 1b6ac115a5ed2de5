use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness check. Does not touch the model, so it answers even when
/// `GEMINI_API_KEY` is missing.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "Backend is running correctly"
    }))
}
