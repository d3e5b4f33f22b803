//! Secret handling for the upstream credential.
//!
//! `ApiKey` wraps the credential so it cannot leak through logs or debug
//! output; the raw value is only reachable through [`ApiKey::expose`].

use secrecy::{ExposeSecret, SecretBox};

/// API key wrapper that prevents accidental logging.
///
/// The inner value is wrapped with `secrecy::SecretBox` to ensure
/// it's not accidentally printed in logs or debug output.
#[derive(Clone)]
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    /// Create a new API key.
    #[must_use]
    pub fn new(key: String) -> Self {
        Self(SecretBox::new(key.into_boxed_str()))
    }

    /// Load a key from an environment variable.
    ///
    /// Returns `None` when the variable is unset or empty. The credential is
    /// read once at process start; a missing key is reported per-request by
    /// the gateway, never as a startup crash.
    #[must_use]
    pub fn from_env(var: &str) -> Option<Self> {
        Self::from_env_value(std::env::var(var).ok())
    }

    fn from_env_value(value: Option<String>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(Self::new)
    }

    /// Expose the secret for actual API calls.
    ///
    /// Use sparingly - only when actually sending to an API.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_redaction() {
        let key = ApiKey::new("sk-secret-key-12345".to_string());

        // Debug output should be redacted
        assert_eq!(format!("{key:?}"), "ApiKey([REDACTED])");
        assert_eq!(format!("{key}"), "[REDACTED]");

        // But we can still expose when needed
        assert_eq!(key.expose(), "sk-secret-key-12345");
    }

    #[test]
    fn test_from_env_value() {
        let key = ApiKey::from_env_value(Some("sk-live".to_string()));
        assert_eq!(key.map(|k| k.expose().to_string()), Some("sk-live".to_string()));

        assert!(ApiKey::from_env_value(Some(String::new())).is_none());
        assert!(ApiKey::from_env_value(None).is_none());
    }

    #[test]
    fn test_from_env_unset() {
        assert!(ApiKey::from_env("TORII_TEST_KEY_THAT_IS_NEVER_SET").is_none());
    }
}
