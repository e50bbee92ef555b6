use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Use POST /api/ask";
pub const MISSING_QUESTION_MESSAGE: &str = "Missing 'question'.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "OpenAI error";

/// API error surfaced to the caller as a JSON `{error, details?}` body.
///
/// Upstream variants only reach the caller under the `surface` failure policy;
/// the default policy absorbs them into a fallback answer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,

    #[error("{}", MISSING_QUESTION_MESSAGE)]
    MissingQuestion,

    #[error("{}", UPSTREAM_ERROR_MESSAGE)]
    UpstreamStatus { details: String },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn upstream_status(details: impl Into<String>) -> Self {
        Self::UpstreamStatus { details: details.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingQuestion => StatusCode::BAD_REQUEST,
            Self::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::UpstreamStatus { details } => {
                ErrorBody { error: UPSTREAM_ERROR_MESSAGE.to_string(), details: Some(details) }
            },
            other => ErrorBody { error: other.to_string(), details: None },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_render_plain_error_field() {
        let (status, body) = render(ApiError::MissingQuestion).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Missing 'question'." }));

        let (status, body) = render(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, serde_json::json!({ "error": "Use POST /api/ask" }));
    }

    #[tokio::test]
    async fn test_upstream_status_carries_details() {
        let (status, body) = render(ApiError::upstream_status("quota exceeded")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "OpenAI error");
        assert_eq!(body["details"], "quota exceeded");
    }

    #[tokio::test]
    async fn test_internal_uses_message() {
        let (status, body) = render(ApiError::internal("connection reset")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "connection reset" }));
    }
}
