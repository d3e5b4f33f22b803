//! Anthropic Messages API provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::traits::{ProviderError, UpstreamProvider, UpstreamResponse};
use torii_core::{ApiKey, ChatRequest};

/// Protocol version header sent on every upstream call.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anthropic API provider.
///
/// Performs exactly one attempt per request with a bounded timeout; timeout
/// expiry surfaces as [`ProviderError::Transport`].
pub struct AnthropicProvider {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider.
    #[must_use]
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create with custom base URL.
    #[must_use]
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl UpstreamProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn forward(&self, request: &ChatRequest) -> Result<UpstreamResponse, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.json::<serde_json::Value>().await?;

        tracing::debug!(status, model = %request.model, "upstream call completed");

        Ok(UpstreamResponse { status, body })
    }
}
