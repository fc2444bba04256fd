// src/cli.rs
// =============================================================================
// Command-line interface, clap derive style.
//
// One operation: lint the given markdown files. Config can come from a JSON
// file (--config) with individual flags layered on top.
// =============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "deadlink",
    version,
    about = "Lints markdown files for dead or redirected links",
    long_about = "deadlink checks every URI referenced by the given markdown files \
                  (remote over HTTP, local against the filesystem) and reports dead \
                  links and redirects with the position needed to fix them in place."
)]
pub struct Cli {
    /// Markdown files to lint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URI for resolving relative references (overrides the file path)
    #[arg(long)]
    pub base_uri: Option<String>,

    /// Glob pattern for URIs to skip (repeatable)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Origin probed with GET instead of HEAD (repeatable)
    #[arg(long = "prefer-get")]
    pub prefer_get: Vec<String>,

    /// Do not check relative URIs
    #[arg(long)]
    pub no_check_relative: bool,

    /// Output diagnostics as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the run configuration: file values first, flags on top.
    pub fn build_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if self.no_check_relative {
            config.check_relative = false;
        }
        if let Some(base) = &self.base_uri {
            config.base_uri = Some(base.clone());
        }
        config.ignore.extend(self.ignore.iter().cloned());
        config.prefer_get.extend(self.prefer_get.iter().cloned());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_layer_over_defaults() {
        let cli = Cli::parse_from([
            "deadlink",
            "readme.md",
            "--no-check-relative",
            "--ignore",
            "https://example.com/*",
            "--prefer-get",
            "https://example.com",
        ]);
        let config = cli.build_config().unwrap();
        assert!(!config.check_relative);
        assert_eq!(config.ignore, vec!["https://example.com/*".to_string()]);
        assert_eq!(config.prefer_get, vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["deadlink"]).is_err());
    }
}
