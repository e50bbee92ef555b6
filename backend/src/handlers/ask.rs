//! Ask Handler - Bible question answering via the completion service

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::Instrument;

use crate::AppState;
use crate::models::AskRequestBody;
use crate::utils::error::{ApiError, ApiResult};

/// /api/ask
///
/// OPTIONS answers the preflight; POST asks; every other method is rejected.
/// The body is read raw so that a missing or wrong `Content-Type` still works.
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskRequestBody,
    responses(
        (status = 200, description = "Model answer, or a localized fallback with `note`", body = crate::models::AskResponse),
        (status = 400, description = "Missing question", body = crate::utils::error::ErrorBody),
        (status = 405, description = "Method other than POST/OPTIONS", body = crate::utils::error::ErrorBody),
        (status = 500, description = "Unexpected failure (surface policy only)", body = crate::utils::error::ErrorBody),
        (status = 502, description = "Upstream error (surface policy only)", body = crate::utils::error::ErrorBody)
    ),
    tag = "Ask"
)]
pub async fn ask(
    State(s): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> ApiResult<Response> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let request = AskRequestBody::parse(&body).into_request()?;
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "ask",
        %request_id,
        lang = request.lang.code(),
        mode = request.mode.code()
    );

    let response = s.ask_service.answer(&request).instrument(span).await?;
    Ok(Json(response).into_response())
}
