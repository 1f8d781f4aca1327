//! # Relay Configuration Module
//!
//! Holds the credentials and endpoints the relay needs to reach the
//! repository-hosting API and the generative-language API. A `Config` is
//! built once at startup, either from the process environment or through
//! `ConfigBuilder`, and handed explicitly to every collaborator.
//!
//! ## Environment
//!
//! - `GITHUB_TOKEN` (required)
//! - `GEMINI_API_KEY` (required)
//! - `GITHUB_API_URL`, `GEMINI_API_URL` (optional endpoint overrides)
//! - `GEMINI_MODEL` (optional model identifier)
//! - `MAX_PROMPT_BYTES` (optional prompt size guard)

use crate::error::{Error, Result};
use std::fmt;

/// Default base URL of the GitHub REST API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default base URL of the Gemini Developer API
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for every analysis unless overridden
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the relay
#[derive(Clone)]
pub struct Config {
    /// Token sent as a bearer credential to the GitHub API
    pub github_token: String,

    /// API key for the Gemini API
    pub gemini_api_key: String,

    /// Base URL of the GitHub API
    pub github_api_url: String,

    /// Base URL of the Gemini API
    pub gemini_api_url: String,

    /// Model identifier passed to `generateContent`
    pub model: String,

    /// Reject prompts larger than this many bytes
    pub max_prompt_bytes: Option<usize>,
}

// Credentials stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .field("github_api_url", &self.github_api_url)
            .field("gemini_api_url", &self.gemini_api_url)
            .field("model", &self.model)
            .field("max_prompt_bytes", &self.max_prompt_bytes)
            .finish()
    }
}

impl Config {
    /// Create a new builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::Config(format!("{} environment variable must be set", key)))
        };

        let mut builder = ConfigBuilder::new()
            .github_token(required("GITHUB_TOKEN")?)
            .gemini_api_key(required("GEMINI_API_KEY")?);

        if let Some(url) = lookup("GITHUB_API_URL") {
            builder = builder.github_api_url(url);
        }
        if let Some(url) = lookup("GEMINI_API_URL") {
            builder = builder.gemini_api_url(url);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            builder = builder.model(model);
        }
        if let Some(limit) = lookup("MAX_PROMPT_BYTES") {
            let limit = limit.trim().parse::<usize>().map_err(|e| {
                Error::Config(format!("MAX_PROMPT_BYTES must be a byte count: {}", e))
            })?;
            builder = builder.max_prompt_bytes(limit);
        }

        builder.build()
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    github_token: Option<String>,
    gemini_api_key: Option<String>,
    github_api_url: Option<String>,
    gemini_api_url: Option<String>,
    model: Option<String>,
    max_prompt_bytes: Option<usize>,
}

impl ConfigBuilder {
    /// Create a new builder with no credentials and default endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GitHub token
    pub fn github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Override the GitHub API base URL
    pub fn github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = Some(url.into());
        self
    }

    /// Override the Gemini API base URL
    pub fn gemini_api_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_api_url = Some(url.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum prompt size in bytes
    pub fn max_prompt_bytes(mut self, limit: usize) -> Self {
        self.max_prompt_bytes = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let github_token = self
            .github_token
            .ok_or_else(|| Error::Config("a GitHub token is required".to_string()))?;
        let gemini_api_key = self
            .gemini_api_key
            .ok_or_else(|| Error::Config("a Gemini API key is required".to_string()))?;

        Ok(Config {
            github_token,
            gemini_api_key,
            github_api_url: trim_base(self.github_api_url, DEFAULT_GITHUB_API_URL),
            gemini_api_url: trim_base(self.gemini_api_url, DEFAULT_GEMINI_API_URL),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_prompt_bytes: self.max_prompt_bytes,
        })
    }
}

fn trim_base(url: Option<String>, default: &str) -> String {
    url.map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}
