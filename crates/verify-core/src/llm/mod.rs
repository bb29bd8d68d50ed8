//! Model access: provider trait, prompt assembly, and response cache.

mod anthropic;
mod cache;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use cache::ResponseCache;
pub use prompt::{ParsedScaffold, PromptBuilder, ScaffoldParser};

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub prompt: String,
    #[serde(default)]
    pub system_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// A completion plus its usage accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
    #[serde(default)]
    pub latency_ms: f64,
    pub timestamp: DateTime<Utc>,
}

impl LlmResponse {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("rate limited: {0}")]
    RateLimit(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("service error (status {status}): {message}")]
    Service { status: u16, message: String },
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Http(String),
}

impl LlmError {
    /// Authentication and request-shape failures will not succeed on a
    /// second attempt, everything else might.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Authentication(_) | Self::InvalidRequest(_))
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn default_model(&self) -> &str;

    /// Keys configured, endpoint reachable in principle.
    fn is_available(&self) -> bool;

    async fn generate(&self, request: &LlmRequest, model: &str) -> Result<LlmResponse, LlmError>;

    /// Retry wrapper with exponential backoff. Non-retryable errors
    /// abort immediately; `max_retries` is the total attempt count.
    async fn generate_with_retry(
        &self,
        request: &LlmRequest,
        model: &str,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<LlmResponse, LlmError> {
        let attempts = max_retries.max(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            match self.generate(request, model).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!(
                        provider = self.provider_name(),
                        model,
                        attempt = attempt + 1,
                        error = %e,
                        "generation attempt failed"
                    );
                    last_error = Some(e);
                    if attempt + 1 < attempts {
                        let backoff = retry_delay * 2u32.saturating_pow(attempt);
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Http("no attempts executed".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability_partition() {
        assert!(LlmError::RateLimit("429".into()).is_retryable());
        assert!(LlmError::Timeout(Duration::from_secs(120)).is_retryable());
        assert!(LlmError::Service { status: 500, message: "overloaded".into() }.is_retryable());
        assert!(!LlmError::Authentication("bad key".into()).is_retryable());
        assert!(!LlmError::InvalidRequest("too long".into()).is_retryable());
    }

    #[test]
    fn test_total_tokens() {
        let response = LlmResponse {
            content: "ok".into(),
            model: "m".into(),
            input_tokens: 100,
            output_tokens: 50,
            latency_ms: 1.0,
            timestamp: Utc::now(),
        };
        assert_eq!(response.total_tokens(), 150);
    }
}
