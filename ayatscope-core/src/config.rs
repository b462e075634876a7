//! Configuration management for `ayatscope-core`.
//!
//! Analysis settings are read from YAML. Every field has a default, so an
//! empty file (or no file at all) reproduces the reference analysis: word
//! tokens, one continuous transition stream, pooled-variance t-test.
//!
//! License: MIT OR Apache-2.0

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::TokenLevel;
use crate::catalog::SurahCatalog;
use crate::transition::StreamMode;

/// Default number of successors shown per query.
pub const DEFAULT_TOP_SUCCESSORS: usize = 10;

/// Settings for the transition model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub stream_mode: StreamMode,
    pub top_successors: usize,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            stream_mode: StreamMode::Continuous,
            top_successors: DEFAULT_TOP_SUCCESSORS,
        }
    }
}

/// Settings for the Makkiyah/Madaniyah comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Pooled-variance (Student) t-test when true, Welch otherwise.
    pub equal_variance: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self { equal_variance: true }
    }
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub token_level: TokenLevel,
    pub transitions: TransitionConfig,
    pub comparison: ComparisonConfig,
    /// Custom surah catalog; the embedded one is used when absent.
    pub catalog_path: Option<PathBuf>,
}

impl AnalysisConfig {
    /// Loads and validates a configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading analysis config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AnalysisConfig = if text.trim().is_empty() {
            AnalysisConfig::default()
        } else {
            serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/ayatscope/config.yaml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ayatscope").join("config.yaml"))
    }

    /// Loads `explicit` if given, else the default config file if it exists,
    /// else the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                debug!("No config file found; using defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.transitions.top_successors == 0 {
            bail!("Config validation failed: 'transitions.top_successors' must be greater than 0.");
        }
        if let Some(path) = &self.catalog_path {
            if path.as_os_str().is_empty() {
                bail!("Config validation failed: 'catalog_path' cannot be empty.");
            }
        }
        Ok(())
    }

    /// The configured surah catalog, falling back to the embedded one.
    pub fn load_catalog(&self) -> Result<SurahCatalog> {
        match &self.catalog_path {
            Some(path) => SurahCatalog::load_from_file(path),
            None => Ok(SurahCatalog::default_catalog().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_analysis() {
        let config = AnalysisConfig::default();
        assert_eq!(config.token_level, TokenLevel::Word);
        assert_eq!(config.transitions.stream_mode, StreamMode::Continuous);
        assert_eq!(config.transitions.top_successors, DEFAULT_TOP_SUCCESSORS);
        assert!(config.comparison.equal_variance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AnalysisConfig = serde_yml::from_str("transitions:\n  stream_mode: per_verse\n").unwrap();
        assert_eq!(config.transitions.stream_mode, StreamMode::PerVerse);
        assert_eq!(config.transitions.top_successors, DEFAULT_TOP_SUCCESSORS);
        assert_eq!(config.token_level, TokenLevel::Word);
    }

    #[test]
    fn test_zero_top_successors_rejected() {
        let mut config = AnalysisConfig::default();
        config.transitions.top_successors = 0;
        assert!(config.validate().is_err());
    }
}
