//! Anthropic Messages API provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::{LlmError, LlmProvider, LlmRequest, LlmResponse};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    default_model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(api_key: String, default_model: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            default_model,
            timeout,
        }
    }

    /// Build a provider from `ANTHROPIC_API_KEY` and the runtime
    /// settings. An unset key yields an unavailable provider rather
    /// than an error, so `list`-style commands still work offline.
    pub fn from_env(settings: &crate::config::Settings) -> crate::error::Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        Ok(Self::new(
            api_key,
            settings.dev_model.clone(),
            settings.request_timeout,
        ))
    }

    fn classify_status(status: u16, body: String) -> LlmError {
        match status {
            429 => LlmError::RateLimit(body),
            401 | 403 => LlmError::Authentication(body),
            400 => LlmError::InvalidRequest(body),
            _ => LlmError::Service {
                status,
                message: body,
            },
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn generate(&self, request: &LlmRequest, model: &str) -> Result<LlmResponse, LlmError> {
        if !self.is_available() {
            return Err(LlmError::Authentication(
                "API key not configured".to_string(),
            ));
        }

        let model = if model.is_empty() {
            &self.default_model
        } else {
            model
        };

        let body = MessagesRequest {
            model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            system: &request.system_prompt,
        };

        debug!(model, prompt_chars = request.prompt.len(), "sending generation request");

        let start = Instant::now();
        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status.as_u16(), body));
        }

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Http(format!("malformed response body: {e}")))?;

        let content = parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: parsed.model,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
            latency_ms,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            AnthropicProvider::classify_status(429, String::new()),
            LlmError::RateLimit(_)
        ));
        assert!(matches!(
            AnthropicProvider::classify_status(401, String::new()),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            AnthropicProvider::classify_status(400, String::new()),
            LlmError::InvalidRequest(_)
        ));
        assert!(matches!(
            AnthropicProvider::classify_status(529, String::new()),
            LlmError::Service { status: 529, .. }
        ));
    }

    #[test]
    fn test_unavailable_without_key() {
        let provider = AnthropicProvider::new(
            String::new(),
            "claude-3-haiku-20240307".to_string(),
            Duration::from_secs(120),
        );
        assert!(!provider.is_available());
    }
}
