//! # Torii Providers
//!
//! Upstream inference provider clients for the Torii gateway.
//!
//! A provider forwards an already-validated [`torii_core::ChatRequest`] and
//! reports the outcome: a completed upstream exchange (any status code) or a
//! transport failure. Providers never reinterpret upstream payloads; the
//! gateway relays them verbatim.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
pub mod traits;

pub use anthropic::{ANTHROPIC_VERSION, AnthropicProvider};
pub use traits::{ProviderError, UpstreamProvider, UpstreamResponse};
