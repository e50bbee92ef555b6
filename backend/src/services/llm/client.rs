//! Chat-completion client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LLMError, UpstreamResult,
};
use crate::config::OpenAiConfig;

/// Seam between the ask flow and the external completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Whether a credential is present
    fn is_configured(&self) -> bool;

    fn model(&self) -> &str;

    /// Send `[system, user]` and report how the exchange ended
    async fn complete(&self, system_prompt: &str, question: &str)
    -> Result<UpstreamResult, LLMError>;
}

/// OpenAI-compatible `/chat/completions` client
pub struct OpenAiClient {
    http_client: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().unwrap_or_default();

        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn build_request(&self, system_prompt: &str, question: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(question)],
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        system_prompt: &str,
        question: &str,
    ) -> Result<UpstreamResult, LLMError> {
        let api_key = self.api_key.as_deref().ok_or(LLMError::NotConfigured)?;
        let url = self.endpoint();
        tracing::debug!("Calling completion service: {} (model={})", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_request(system_prompt, question))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Ok(UpstreamResult::failed(status.as_u16(), body));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        Ok(UpstreamResult::answered(status.as_u16(), parsed.answer_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config =
            OpenAiConfig { api_base: "https://example.test/v1/".to_string(), ..Default::default() };
        let client = OpenAiClient::new(&config);
        assert_eq!(client.endpoint(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_build_request_uses_config() {
        let config = OpenAiConfig {
            model: "gpt-test".to_string(),
            temperature: 0.25,
            ..Default::default()
        };
        let client = OpenAiClient::new(&config);
        let req = client.build_request("be kind", "who is Ruth?");
        assert_eq!(req.model, "gpt-test");
        assert_eq!(req.temperature, 0.25);
        assert_eq!(req.messages, vec![ChatMessage::system("be kind"), ChatMessage::user("who is Ruth?")]);
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let client = OpenAiClient::new(&OpenAiConfig::default());
        assert!(!client.is_configured());
        let err = client.complete("sys", "q").await.unwrap_err();
        assert!(matches!(err, LLMError::NotConfigured));
    }
}
