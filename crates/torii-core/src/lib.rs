//! # Torii Core
//!
//! Core types, request validation, and secret handling for the Torii
//! chat-completion gateway.
//!
//! This crate provides:
//! - Identity and quota-period types (`ClientId`, `DayStamp`, `QuotaKey`)
//! - Inbound payload validation (`validate_chat_payload`)
//! - Secret handling for the upstream credential (`ApiKey`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod secrets;
pub mod types;
pub mod validation;

pub use secrets::ApiKey;
pub use types::{ChatRequest, ClientId, DayStamp, QuotaKey};
pub use validation::{ValidationError, ValidationLimits, validate_chat_payload};
