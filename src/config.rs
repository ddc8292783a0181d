//! Configuration file support for ferro-hgvs2vcf.
//!
//! This module loads `.ferro.toml` configuration files that tune how the
//! resolution orchestrator picks between the full and fallback paths and
//! which input corrections it applies.
//!
//! # Example Configuration
//!
//! ```toml
//! [resolver]
//! full-resolution = true
//! fallback-effects = ["splice", "frameshift", "nonframeshift"]
//! unescape-html = true
//!
//! [[resolver.rewrites]]
//! from = "2169_*27>T"
//! to = "2169_*27del48"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro.toml` in current directory
//! 2. `~/.config/ferro/config.toml`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::FerroError;

/// Parsed configuration from a .ferro.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FerroConfig {
    /// Resolution orchestrator settings.
    pub resolver: ResolverConfig,
}

/// `[resolver]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Try the full transcript-aware path before falling back.
    pub full_resolution: bool,
    /// Functional effects that skip the full path (case-insensitive).
    pub fallback_effects: Vec<String>,
    /// Decode `&gt;`, `&lt;` and `&amp;` in incoming notation.
    pub unescape_html: bool,
    /// Known notation anomalies, replaced before resolution.
    pub rewrites: Vec<Rewrite>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            full_resolution: true,
            fallback_effects: vec![
                "splice".to_string(),
                "frameshift".to_string(),
                "nonframeshift".to_string(),
            ],
            unescape_html: true,
            rewrites: vec![Rewrite::new("2169_*27>T", "2169_*27del48")],
        }
    }
}

impl ResolverConfig {
    /// Check whether a functional effect sends a variant straight to the fallback path
    pub fn is_fallback_effect(&self, functional_effect: &str) -> bool {
        let effect = functional_effect.trim();
        self.fallback_effects
            .iter()
            .any(|e| e.eq_ignore_ascii_case(effect))
    }
}

/// A whole-notation replacement for a known dataset anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl FerroConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro.toml` in current directory
    /// 2. `~/.config/ferro/config.toml`
    ///
    /// A file that exists but fails to parse is logged and skipped.
    pub fn load() -> Option<Self> {
        let mut candidates = vec![PathBuf::from(".ferro.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("ferro").join("config.toml"));
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    log::debug!("loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => log::warn!("ignoring {}: {}", path.display(), e),
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Parse error in config file.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for FerroError {
    fn from(err: ConfigError) -> Self {
        FerroError::Config {
            msg: err.to_string(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = FerroConfig::parse("").unwrap();
        assert_eq!(config, FerroConfig::default());
        assert!(config.resolver.full_resolution);
        assert_eq!(config.resolver.rewrites.len(), 1);
    }

    #[test]
    fn test_parse_resolver_section() {
        let content = r#"
[resolver]
full-resolution = false
fallback-effects = ["splice"]
"#;
        let config = FerroConfig::parse(content).unwrap();
        assert!(!config.resolver.full_resolution);
        assert_eq!(config.resolver.fallback_effects, vec!["splice"]);
        // unspecified keys keep their defaults
        assert!(config.resolver.unescape_html);
    }

    #[test]
    fn test_parse_rewrites() {
        let content = r#"
# dataset fixups
[[resolver.rewrites]]
from = "100_101>A"
to = "100_101delinsA"
"#;
        let config = FerroConfig::parse(content).unwrap();
        assert_eq!(
            config.resolver.rewrites,
            vec![Rewrite::new("100_101>A", "100_101delinsA")]
        );
    }

    #[test]
    fn test_parse_error() {
        let err = FerroConfig::parse("[resolver]\nfull-resolution = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err: FerroError = err.into();
        assert!(matches!(err, FerroError::Config { .. }));
    }

    #[test]
    fn test_fallback_effect_case_insensitive() {
        let config = ResolverConfig::default();
        assert!(config.is_fallback_effect("Splice"));
        assert!(config.is_fallback_effect(" FRAMESHIFT "));
        assert!(!config.is_fallback_effect("missense"));
    }
}
