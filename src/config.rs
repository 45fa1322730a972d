//! Environment configuration for the exporter.
//!
//! Credentials come from `GIO_USERNAME` / `GIO_PASSWORD`; the API base URL
//! can be overridden with `GIO_BASE_URL` (useful for pointing integration
//! tests at a mock server).

use std::fmt;

use thiserror::Error;

/// Default groups.io API base URL.
pub const DEFAULT_BASE_URL: &str = "https://groups.io/api/";

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable {name}")]
    MissingVar {
        /// The variable that was not set.
        name: &'static str,
    },
}

/// Runtime configuration loaded from the environment.
///
/// The password is intentionally redacted in Debug output to prevent
/// accidental logging of credentials.
#[derive(Clone)]
pub struct Config {
    /// groups.io account email.
    pub username: String,
    /// API base URL, always ending in a trailing slash.
    pub base_url: String,
    /// groups.io account password (sensitive — never log).
    password: String,
}

impl Config {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if `GIO_USERNAME` or
    /// `GIO_PASSWORD` is absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = require_var("GIO_USERNAME")?;
        let password = require_var("GIO_PASSWORD")?;
        let base_url = std::env::var("GIO_BASE_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(username, password, base_url))
    }

    /// Creates a configuration from explicit values.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            username: username.into(),
            password: password.into(),
            base_url,
        }
    }

    /// Returns the account password.
    ///
    /// The value is sensitive — avoid logging the return value.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar { name })
}

// Custom Debug impl that redacts the password.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("base_url", &self.base_url)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
