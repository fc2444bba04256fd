// src/config.rs
// =============================================================================
// Run configuration, built once per invocation and passed by reference into
// the lint core. Loadable from a JSON file; every field has a default so an
// empty object (or no file at all) is a valid configuration.
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whether relative URIs are resolved and checked at all.
    #[serde(rename = "checkRelative")]
    pub check_relative: bool,

    /// Explicit resolution base for relative URIs. When unset, the linted
    /// file's own path is used instead.
    #[serde(rename = "baseURI")]
    pub base_uri: Option<String>,

    /// Glob patterns for URIs that are never checked.
    pub ignore: Vec<String>,

    /// Origins probed with GET from the first attempt instead of HEAD.
    #[serde(rename = "preferGET")]
    pub prefer_get: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            check_relative: true,
            base_uri: None,
            ignore: Vec::new(),
            prefer_get: Vec::new(),
        }
    }
}

impl Config {
    /// Reads a configuration file (JSON).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.check_relative);
        assert!(config.base_uri.is_none());
        assert!(config.ignore.is_empty());
        assert!(config.prefer_get.is_empty());
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.check_relative);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "checkRelative": false,
                "baseURI": "https://example.com/",
                "ignore": ["https://example.com/private/*"],
                "preferGET": ["https://example.com"]
            }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.check_relative);
        assert_eq!(config.base_uri.as_deref(), Some("https://example.com/"));
        assert_eq!(config.ignore.len(), 1);
        assert_eq!(config.prefer_get, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"checkRelatve": true}"#);
        assert!(result.is_err());
    }
}
