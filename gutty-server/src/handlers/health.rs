use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::AppState;

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Gutty catalog server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let mut is_unhealthy = false;

    match state.database().ping().await {
        Ok(()) => {
            health_status["checks"]["database"] = json!({
                "status": "healthy",
            });
        }
        Err(e) => {
            warn!(error = %e, "health check: database unreachable");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            is_unhealthy = true;
        }
    }

    health_status["checks"]["uploads"] = json!({
        "status": "healthy",
        "root_exists": state.assets().root().exists(),
    });

    if is_unhealthy {
        health_status["status"] = json!("unhealthy");
        (StatusCode::SERVICE_UNAVAILABLE, Json(health_status))
    } else {
        (StatusCode::OK, Json(health_status))
    }
}
