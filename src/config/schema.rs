//! KDL schema definitions for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the KDL schema
//! - Parsing from KDL format
//! - Validation
//! - The config file location

use crate::{Error, Result};
use kdl::KdlDocument;
use std::path::PathBuf;

/// Built-in default task store endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api";

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// endpoint "http://localhost:8000/api"
/// token-cookie "token"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckConfig {
    /// Base URL of the task store API
    pub endpoint: Option<String>,

    /// Name of the session token cookie
    pub token_cookie: Option<String>,
}

impl DeckConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "endpoint must be an http(s) URL, got {:?}",
                    endpoint
                ));
            }
        }
        if let Some(ref cookie) = self.token_cookie {
            if cookie.trim().is_empty() {
                return Err("token-cookie must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(node) = doc.get("endpoint") {
            if let Some(entry) = node.entries().first() {
                if let Some(s) = entry.value().as_string() {
                    config.endpoint = Some(s.to_string());
                }
            }
        }

        if let Some(node) = doc.get("token-cookie") {
            if let Some(entry) = node.entries().first() {
                if let Some(s) = entry.value().as_string() {
                    config.token_cookie = Some(s.to_string());
                }
            }
        }

        config
    }

    /// Parse and validate config from KDL text.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: KdlDocument = text
            .parse()
            .map_err(|e| Error::Config(format!("invalid config.kdl: {}", e)))?;
        let config = Self::from_kdl(&doc);
        config.validate().map_err(Error::Config)?;
        Ok(config)
    }

    /// Load config from the given file, or an empty config if the file
    /// does not exist.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

/// Location of the user config file: `~/.config/taskdeck/config.kdl`.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskdeck").join("config.kdl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = DeckConfig::parse(
            "endpoint \"https://tasks.example.com/api\"\ntoken-cookie \"session\"\n",
        )
        .unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://tasks.example.com/api")
        );
        assert_eq!(config.token_cookie.as_deref(), Some("session"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = DeckConfig::parse("").unwrap();
        assert_eq!(config, DeckConfig::new());
    }

    #[test]
    fn test_parse_ignores_unknown_nodes() {
        let config = DeckConfig::parse("editor \"nvim\"\nendpoint \"http://x/api\"\n").unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://x/api"));
        assert!(config.token_cookie.is_none());
    }

    #[test]
    fn test_parse_rejects_non_url_endpoint() {
        assert!(DeckConfig::parse("endpoint \"localhost:8000\"\n").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_kdl() {
        assert!(DeckConfig::parse("endpoint \"unclosed").is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeckConfig::load(&dir.path().join("config.kdl")).unwrap();
        assert_eq!(config, DeckConfig::new());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.kdl");
        std::fs::write(&path, "endpoint \"http://store:9000/api\"\n").unwrap();
        let config = DeckConfig::load(&path).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://store:9000/api"));
    }
}
