use std::sync::Arc;
use std::time::Instant;

use crate::config::UpstreamFailurePolicy;
use crate::models::{AskRequest, AskResponse};
use crate::services::fallback::fallback_answer;
use crate::services::llm::{CompletionClient, LLMError, PromptProfile, UpstreamResult};
use crate::utils::{ApiError, ApiResult};

/// Legacy answer when upstream replies 2xx without content under the surface policy
pub const NO_ANSWER_TEXT: &str = "I couldn't produce an answer.";

pub struct AskService {
    client: Arc<dyn CompletionClient>,
    policy: UpstreamFailurePolicy,
}

impl AskService {
    pub fn new(client: Arc<dyn CompletionClient>, policy: UpstreamFailurePolicy) -> Self {
        Self { client, policy }
    }

    pub fn client(&self) -> &dyn CompletionClient {
        self.client.as_ref()
    }

    pub fn policy(&self) -> UpstreamFailurePolicy {
        self.policy
    }

    /// Resolve one ask request into a response or a caller-facing error
    pub async fn answer(&self, request: &AskRequest) -> ApiResult<AskResponse> {
        let profile = PromptProfile::select(request.lang, request.mode);
        let t0 = Instant::now();

        let outcome = self.client.complete(&profile.system_prompt, &request.question).await;
        let ms = t0.elapsed().as_millis() as u64;

        match outcome {
            Ok(UpstreamResult { ok: true, answer_text: Some(text), .. }) => {
                tracing::debug!(
                    "Completion answered in {}ms (lang={}, mode={})",
                    ms,
                    request.lang.code(),
                    request.mode.code()
                );
                Ok(AskResponse::answered(text))
            },
            Ok(UpstreamResult { ok: true, status, .. }) => {
                tracing::warn!("Completion service returned {} without answer content", status);
                self.missing_content(request)
            },
            Ok(UpstreamResult { status, raw_error, .. }) => {
                let details = raw_error.unwrap_or_default();
                tracing::warn!("Completion service returned {} after {}ms: {}", status, ms, details);
                self.upstream_status(request, details)
            },
            Err(err) => {
                tracing::warn!("Completion call failed after {}ms: {}", ms, err);
                self.unexpected(request, err)
            },
        }
    }

    fn missing_content(&self, request: &AskRequest) -> ApiResult<AskResponse> {
        match self.policy {
            UpstreamFailurePolicy::Fallback => Ok(self.fallback(request)),
            UpstreamFailurePolicy::Surface => Ok(AskResponse::answered(NO_ANSWER_TEXT)),
        }
    }

    fn upstream_status(&self, request: &AskRequest, details: String) -> ApiResult<AskResponse> {
        match self.policy {
            UpstreamFailurePolicy::Fallback => Ok(self.fallback(request)),
            UpstreamFailurePolicy::Surface => Err(ApiError::upstream_status(details)),
        }
    }

    fn unexpected(&self, request: &AskRequest, err: LLMError) -> ApiResult<AskResponse> {
        match self.policy {
            UpstreamFailurePolicy::Fallback => {
                let answer = fallback_answer(&request.question, request.lang, request.mode);
                tracing::info!(
                    "Serving fallback answer (lang={}, mode={}, class={})",
                    request.lang.code(),
                    request.mode.code(),
                    err.class()
                );
                Ok(AskResponse::fallback_error(answer, err.class()))
            },
            UpstreamFailurePolicy::Surface => Err(ApiError::internal(err.to_string())),
        }
    }

    fn fallback(&self, request: &AskRequest) -> AskResponse {
        tracing::info!(
            "Serving fallback answer (lang={}, mode={})",
            request.lang.code(),
            request.mode.code()
        );
        AskResponse::fallback(fallback_answer(&request.question, request.lang, request.mode))
    }
}
