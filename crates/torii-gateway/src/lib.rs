//! # Torii Gateway
//!
//! Admission-control and forwarding gateway for chat completions.
//!
//! Each request passes a single-pass pipeline: method gate, credential
//! check, per-client daily quota, payload validation, then one forwarding
//! attempt whose outcome is relayed verbatim.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Per-client daily admission quota.
pub mod quota;
mod server;

pub use quota::DailyQuota;
pub use server::{CREDENTIAL_ENV, Gateway, GatewayConfig, GatewayState};

/// Start the gateway server.
///
/// # Errors
///
/// Returns error if server fails to start.
pub async fn start(config: GatewayConfig) -> Result<(), GatewayError> {
    let gateway = Gateway::new(config);
    gateway.run().await
}

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Server error.
    #[error("Server error: {0}")]
    Server(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
