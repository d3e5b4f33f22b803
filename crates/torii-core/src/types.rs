//! Core types used throughout Torii.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a calling client, derived from its apparent network address.
///
/// The address comes from a forwarding header the client can influence, so
/// this identity is good for quota bucketing only, never authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl ClientId {
    /// Create a client ID from a raw address string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The sentinel identity used when no address is available.
    #[must_use]
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    /// Derive an identity from an `X-Forwarded-For` style header value.
    ///
    /// Takes the first comma-separated token and trims it; an absent or
    /// empty header maps to [`ClientId::unknown`].
    #[must_use]
    pub fn from_forwarded_header(header: Option<&str>) -> Self {
        header
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map_or_else(Self::unknown, Self::new)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A UTC calendar-day quota period.
///
/// All period computation is UTC-normalized; two stamps are equal exactly
/// when they fall on the same UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayStamp(NaiveDate);

impl DayStamp {
    /// Create a stamp for an explicit date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The current UTC calendar day.
    #[must_use]
    pub fn today_utc() -> Self {
        Self(Utc::now().date_naive())
    }

    /// The underlying date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Key for one client's usage counter within one quota period.
///
/// Compared by value as a structured pair rather than a formatted string, so
/// date-formatting quirks can never split or merge buckets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuotaKey {
    /// The client the counter belongs to.
    pub client: ClientId,
    /// The UTC day the counter covers.
    pub day: DayStamp,
}

impl QuotaKey {
    /// Build a key from its components.
    #[must_use]
    pub const fn new(client: ClientId, day: DayStamp) -> Self {
        Self { client, day }
    }
}

impl fmt::Display for QuotaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.client, self.day)
    }
}

/// A validated chat-completion request, ready to be forwarded upstream.
///
/// `system` and `messages` are opaque pass-through fields: their shape is the
/// upstream provider's contract. Absent fields stay absent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Allow-listed model identifier.
    pub model: String,

    /// Token budget, clamped to the configured ceiling.
    pub max_tokens: u32,

    /// Optional system instruction, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Conversation messages, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<serde_json::Value>,
}
