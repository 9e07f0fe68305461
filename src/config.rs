//! Client configuration.
//!
//! Configuration is read from the process environment or from a JSON
//! document. Environment lookups go through an injectable function so tests
//! never mutate process-wide state.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the backend base URL.
pub const API_BASE_URL_ENV: &str = "FLOW_API_BASE_URL";

/// Environment variable naming the durable session directory.
pub const SESSION_DIR_ENV: &str = "FLOW_SESSION_DIR";

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Session directory used when none is configured.
pub const DEFAULT_SESSION_DIR: &str = ".flow-session";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not use an HTTP scheme.
    #[error("invalid API base URL '{0}', expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// The session directory is empty.
    #[error("session directory must not be empty")]
    EmptySessionDir,

    /// The JSON document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// Runtime configuration for the Flow client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FlowConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    /// Directory holding the persisted session.
    pub session_dir: Utf8PathBuf,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_dir: Utf8PathBuf::from(DEFAULT_SESSION_DIR),
        }
    }
}

impl FlowConfig {
    /// Builds and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is not an HTTP URL or the
    /// session directory is empty.
    pub fn new(
        api_base_url: impl Into<String>,
        session_dir: impl Into<Utf8PathBuf>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            api_base_url: api_base_url.into(),
            session_dir: session_dir.into(),
        };
        config.validated()
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a configured value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a configured value fails validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let api_base_url =
            non_blank(API_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let session_dir =
            non_blank(SESSION_DIR_ENV).unwrap_or_else(|| DEFAULT_SESSION_DIR.to_owned());
        Self::new(api_base_url, session_dir)
    }

    /// Parses configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// errors of [`FlowConfig::new`] otherwise.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let parsed: Self =
            serde_json::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        parsed.validated()
    }

    /// Joins an API path onto the configured base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        format!("{}/{trimmed}", self.api_base_url)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let url = self.api_base_url.trim().trim_end_matches('/');
        let has_host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url));
        }
        self.api_base_url = url.to_owned();

        if self.session_dir.as_str().trim().is_empty() {
            return Err(ConfigError::EmptySessionDir);
        }
        Ok(self)
    }
}
