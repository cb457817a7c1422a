//! Unified precedence resolution for configuration.
//!
//! Single entry point for resolving the task store endpoint and the token
//! cookie name with proper precedence.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment variables (`TD_ENDPOINT`, `TD_TOKEN_COOKIE`)
//! 3. `~/.config/taskdeck/config.kdl`
//! 4. Built-in defaults

use super::schema::{DEFAULT_ENDPOINT, DeckConfig, config_file_path};
use crate::Result;
use crate::gate::DEFAULT_TOKEN_COOKIE;

/// Environment variable overriding the task store endpoint.
pub const TD_ENDPOINT_ENV: &str = "TD_ENDPOINT";

/// Environment variable overriding the token cookie name.
pub const TD_TOKEN_COOKIE_ENV: &str = "TD_TOKEN_COOKIE";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from a CLI flag
    CliFlag,
    /// Value from an environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Task store base endpoint
    pub endpoint: Resolved<String>,
    /// Session token cookie name
    pub token_cookie: Resolved<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: Resolved::new(DEFAULT_ENDPOINT.to_string(), ValueSource::Default),
            token_cookie: Resolved::new(DEFAULT_TOKEN_COOKIE.to_string(), ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    /// Get the endpoint value.
    pub fn endpoint(&self) -> &str {
        &self.endpoint.value
    }

    /// Get the token cookie name.
    pub fn token_cookie(&self) -> &str {
        &self.token_cookie.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Endpoint override from CLI flag
    pub endpoint: Option<String>,
    /// Token cookie override from CLI flag
    pub token_cookie: Option<String>,
}

impl ConfigOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint override.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set token cookie override.
    pub fn with_token_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.token_cookie = Some(cookie.into());
        self
    }
}

/// Resolve configuration with the full precedence chain, reading the
/// config file from its standard location.
pub fn resolve(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let file_config = match config_file_path() {
        Some(path) => DeckConfig::load(&path)?,
        None => DeckConfig::new(),
    };
    Ok(resolve_with(overrides, &file_config))
}

/// Resolve configuration against an already-loaded file config.
pub fn resolve_with(overrides: &ConfigOverrides, file_config: &DeckConfig) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    if let Some(ref endpoint) = overrides.endpoint {
        result.endpoint = Resolved::new(endpoint.clone(), ValueSource::CliFlag);
    } else if let Ok(endpoint) = std::env::var(TD_ENDPOINT_ENV) {
        result.endpoint = Resolved::new(endpoint, ValueSource::EnvVar(TD_ENDPOINT_ENV.to_string()));
    } else if let Some(ref endpoint) = file_config.endpoint {
        result.endpoint = Resolved::new(endpoint.clone(), ValueSource::ConfigFile);
    }

    if let Some(ref cookie) = overrides.token_cookie {
        result.token_cookie = Resolved::new(cookie.clone(), ValueSource::CliFlag);
    } else if let Ok(cookie) = std::env::var(TD_TOKEN_COOKIE_ENV) {
        result.token_cookie =
            Resolved::new(cookie, ValueSource::EnvVar(TD_TOKEN_COOKIE_ENV.to_string()));
    } else if let Some(ref cookie) = file_config.token_cookie {
        result.token_cookie = Resolved::new(cookie.clone(), ValueSource::ConfigFile);
    }

    result
}
