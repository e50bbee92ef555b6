pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    routing::{any, get},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::services::{AskService, CompletionClient, OpenAiClient};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::ask::ask, handlers::health::health),
    components(schemas(
        models::AskRequestBody,
        models::AskResponse,
        utils::ErrorBody,
        handlers::health::HealthResponse
    )),
    tags(
        (name = "Ask", description = "Bible question answering"),
        (name = "Health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Shared, read-only application state
pub struct AppState {
    pub ask_service: AskService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = Arc::new(OpenAiClient::new(&config.openai));
        Self::with_client(config, client)
    }

    pub fn with_client(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        Self { ask_service: AskService::new(client, config.ask.on_upstream_failure) }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ask", any(handlers::ask::ask))
        .route("/api/health", get(handlers::health::health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(axum::middleware::from_fn(middleware::cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
