use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Whether an API key is present; without one every answer is a fallback
    pub upstream_configured: bool,
    pub model: String,
    pub policy: String,
}

/// Get service status
/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service status", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health(State(s): State<Arc<AppState>>) -> Json<HealthResponse> {
    let client = s.ask_service.client();
    Json(HealthResponse {
        status: "ok".to_string(),
        upstream_configured: client.is_configured(),
        model: client.model().to_string(),
        policy: s.ask_service.policy().as_str().to_string(),
    })
}
