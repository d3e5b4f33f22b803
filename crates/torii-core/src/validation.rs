//! Inbound payload validation.
//!
//! The gateway trusts only three things about the inbound payload: the model
//! is allow-listed, the token budget is bounded, and everything else is
//! opaque pass-through for the upstream provider to judge.

use serde_json::Value;
use thiserror::Error;

use crate::types::ChatRequest;

/// Validation error types.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The requested model is not on the allow-list (or is absent).
    #[error("Invalid model")]
    InvalidModel,
}

/// Bounds applied to inbound payloads.
///
/// The defaults are the production values; every field can be overridden
/// without changing default behavior elsewhere.
#[derive(Debug, Clone)]
pub struct ValidationLimits {
    /// Model identifiers callers are permitted to request.
    pub allowed_models: Vec<String>,

    /// Token budget applied when the caller omits one.
    pub default_max_tokens: u32,

    /// Hard ceiling on the token budget, never negotiable upward.
    pub max_tokens_ceiling: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            allowed_models: vec!["claude-sonnet-4-20250514".to_string()],
            default_max_tokens: 1000,
            max_tokens_ceiling: 4096,
        }
    }
}

impl ValidationLimits {
    /// Check whether a model identifier is allow-listed.
    #[must_use]
    pub fn is_allowed_model(&self, model: &str) -> bool {
        self.allowed_models.iter().any(|m| m == model)
    }
}

/// Validate an inbound chat payload into a [`ChatRequest`].
///
/// - `model` must be an allow-listed string; any other value, including
///   absent, fails with [`ValidationError::InvalidModel`].
/// - `max_tokens` falls back to the default when absent or zero and is
///   clamped to the ceiling otherwise.
/// - `system` and `messages` pass through verbatim; absent stays absent.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidModel`] when the model check fails. No
/// upstream call may be made for a payload that fails validation.
pub fn validate_chat_payload(
    payload: &Value,
    limits: &ValidationLimits,
) -> Result<ChatRequest, ValidationError> {
    let model = payload
        .get("model")
        .and_then(Value::as_str)
        .filter(|model| limits.is_allowed_model(model))
        .ok_or(ValidationError::InvalidModel)?;

    let max_tokens = match payload.get("max_tokens").and_then(Value::as_u64) {
        // Zero counts as absent.
        None | Some(0) => limits.default_max_tokens,
        Some(requested) => {
            u32::try_from(requested).unwrap_or(u32::MAX).min(limits.max_tokens_ceiling)
        }
    };

    let system = payload
        .get("system")
        .and_then(Value::as_str)
        .map(str::to_string);

    let messages = payload.get("messages").cloned();

    Ok(ChatRequest {
        model: model.to_string(),
        max_tokens,
        system,
        messages,
    })
}
