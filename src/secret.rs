//! Startup-time API credential handling.
//!
//! The generative-language API key is read once at process start and passed
//! explicitly to every component that talks to the hosted model. A missing
//! key fails fast with a configuration error instead of surfacing later as
//! an HTTP failure deep inside the pipeline.

use crate::error::{LecternError, Result};

/// Primary environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Fallback variable, matching the name used by Google's own tooling.
pub const API_KEY_FALLBACK_VAR: &str = "GOOGLE_API_KEY";

/// Generative-language API key.
///
/// Wraps the raw secret so it is passed around deliberately and never
/// printed: `Debug` output is redacted.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read the key from the environment, failing fast if absent.
    pub fn from_env() -> Result<Self> {
        for var in [API_KEY_VAR, API_KEY_FALLBACK_VAR] {
            if let Ok(value) = std::env::var(var)
                && !value.trim().is_empty()
            {
                return Ok(Self(value.trim().to_string()));
            }
        }
        Err(LecternError::ApiKeyMissing {
            variable: API_KEY_VAR.to_string(),
        })
    }

    /// Wrap an already-obtained key (tests, alternate secret stores).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw secret, for building request URLs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
