//! Provider traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use torii_core::ChatRequest;

/// Provider errors.
///
/// Only failures of the transport itself are errors; an upstream response
/// with a non-success status code is data and travels back through
/// [`UpstreamResponse`].
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The upstream call could not be completed: connection failure,
    /// timeout, or an undecodable response body.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The outcome of a completed upstream call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamResponse {
    /// Upstream HTTP status code, relayed as-is.
    pub status: u16,

    /// Upstream JSON body, relayed verbatim.
    pub body: serde_json::Value,
}

/// Upstream inference provider.
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    /// Provider name.
    fn name(&self) -> &str;

    /// Issue a single forwarding attempt for a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] when the call itself could not
    /// complete. A completed exchange always yields `Ok`, whatever the
    /// upstream status code.
    async fn forward(&self, request: &ChatRequest) -> Result<UpstreamResponse, ProviderError>;
}
