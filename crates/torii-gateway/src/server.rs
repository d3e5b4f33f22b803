//! Gateway server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use torii_core::{ApiKey, ClientId, ValidationLimits, validate_chat_payload};
use torii_providers::{AnthropicProvider, UpstreamProvider, UpstreamResponse};

use crate::GatewayError;
use crate::quota::{DEFAULT_DAILY_LIMIT, DEFAULT_SWEEP_THRESHOLD, DailyQuota};

/// Environment variable holding the upstream credential.
pub const CREDENTIAL_ENV: &str = "ANTHROPIC_API_KEY";

/// Rejection message shown when a client exhausts its daily quota.
const DAILY_LIMIT_MESSAGE: &str = "本日の利用上限に達しました。明日また来てください。";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Port to listen on.
    pub port: u16,
    /// Bind address.
    pub bind_address: String,
    /// Admitted requests per client per UTC day.
    pub daily_limit: u32,
    /// Distinct counter keys that trigger an eviction sweep.
    pub quota_sweep_threshold: usize,
    /// Upstream provider base URL.
    pub upstream_base_url: String,
    /// Timeout applied to each upstream call.
    pub upstream_timeout: Duration,
    /// Inbound payload bounds.
    pub limits: ValidationLimits,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            bind_address: "127.0.0.1".to_string(),
            daily_limit: DEFAULT_DAILY_LIMIT,
            quota_sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
            upstream_base_url: "https://api.anthropic.com".to_string(),
            upstream_timeout: Duration::from_secs(60),
            limits: ValidationLimits::default(),
        }
    }
}

impl GatewayConfig {
    /// Load config from environment variables (overrides).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(port) = std::env::var("TORII_PORT").ok().and_then(|v| v.parse().ok()) {
            self.port = port;
        }

        if let Ok(bind) = std::env::var("TORII_BIND") {
            self.bind_address = bind;
        }

        self
    }
}

/// Gateway server state shared across handlers.
pub struct GatewayState {
    /// Per-client daily admission quota.
    pub quota: DailyQuota,
    /// Upstream provider; `None` when the credential was absent at startup.
    pub provider: Option<Arc<dyn UpstreamProvider>>,
    /// Inbound payload bounds.
    pub limits: ValidationLimits,
}

/// Gateway server.
pub struct Gateway {
    config: GatewayConfig,
    state: Arc<GatewayState>,
}

impl Gateway {
    /// Create a gateway, sourcing the upstream credential from the
    /// environment.
    ///
    /// A missing credential is not a startup error: the gateway runs and
    /// reports the condition per-request.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let provider = ApiKey::from_env(CREDENTIAL_ENV).map(|key| {
            Arc::new(
                AnthropicProvider::with_base_url(key, config.upstream_base_url.clone())
                    .with_timeout(config.upstream_timeout),
            ) as Arc<dyn UpstreamProvider>
        });

        if provider.is_none() {
            tracing::warn!(
                "{} is not set; all chat requests will be rejected",
                CREDENTIAL_ENV
            );
        }

        Self::with_provider(config, provider)
    }

    /// Create a gateway with an explicit provider (or none).
    #[must_use]
    pub fn with_provider(
        config: GatewayConfig,
        provider: Option<Arc<dyn UpstreamProvider>>,
    ) -> Self {
        let state = GatewayState {
            quota: DailyQuota::new(config.daily_limit, config.quota_sweep_threshold),
            provider,
            limits: config.limits.clone(),
        };

        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Build the router serving this gateway.
    ///
    /// Every response carries permissive CORS headers restricted to `POST`
    /// and the pre-flight probe.
    #[must_use]
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/health", get(health_handler))
            .route("/v1/chat", any(chat_handler))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Run the gateway server.
    ///
    /// # Errors
    ///
    /// Returns error if the bind address is invalid or the listener fails.
    pub async fn run(&self) -> Result<(), GatewayError> {
        let addr: SocketAddr = format!("{}:{}", self.config.bind_address, self.config.port)
            .parse()
            .map_err(|e| GatewayError::Config(format!("Invalid address: {e}")))?;

        tracing::info!("Gateway listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

async fn health_handler() -> &'static str {
    "OK"
}

/// The single-pass chat pipeline: method gate, credential check, admission,
/// validation, forward, relay. Every rejection is a `{"error": ...}` body;
/// nothing internal ever reaches the caller.
async fn chat_handler(
    State(state): State<Arc<GatewayState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    if method != Method::POST {
        return reject(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let Some(provider) = state.provider.as_ref() else {
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "API key not configured");
    };

    let client = ClientId::from_forwarded_header(
        headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok()),
    );
    if !state.quota.check(&client) {
        tracing::debug!(client = %client, "daily quota exhausted");
        return reject(StatusCode::TOO_MANY_REQUESTS, DAILY_LIMIT_MESSAGE);
    }

    // An unparseable body validates like an empty payload and fails the
    // model check.
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let Ok(request) = validate_chat_payload(&payload, &state.limits) else {
        return reject(StatusCode::BAD_REQUEST, "Invalid model");
    };

    match provider.forward(&request).await {
        Ok(upstream) => relay(upstream),
        Err(err) => {
            // Operators get the cause; callers get the generic body.
            tracing::error!(error = %err, "upstream call failed");
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn relay(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(upstream.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 8787);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.daily_limit, 50);
        assert_eq!(config.quota_sweep_threshold, 1000);
    }

    #[test]
    fn test_gateway_without_provider() {
        let gateway = Gateway::with_provider(GatewayConfig::default(), None);
        assert!(gateway.state.provider.is_none());
        assert_eq!(gateway.state.quota.limit(), 50);
    }
}
