//! Configuration file schema and discovery.
//!
//! A configuration file is optional. Every field falls back to the built-in
//! default, and command-line flags override whatever the file sets.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::check::{CheckCode, Selection, DEFAULT_MAX_LINE_LENGTH};
use crate::walk::DEFAULT_EXTENSIONS;

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["stylecheck.yaml", ".stylecheck.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Codes to run (default: all)
    #[serde(default)]
    pub select: Option<Vec<CheckCode>>,
    /// Codes to skip
    #[serde(default)]
    pub ignore: Vec<CheckCode>,
    /// Limit for the line length check (default: 79)
    #[serde(default)]
    pub max_line_length: Option<usize>,
    /// File extensions to scan, without the dot (default: ["py"])
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Glob patterns, relative to the scanned directory, of files to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a configuration from YAML text. An empty document is the
    /// default configuration.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Look for a configuration file in `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Check selection derived from this configuration.
    pub fn selection(&self) -> Selection {
        Selection {
            select: self.select.clone(),
            ignore: self.ignore.clone(),
            max_line_length: self.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH),
        }
    }

    /// Extensions to scan, falling back to the defaults.
    pub fn extensions(&self) -> Vec<String> {
        match &self.extensions {
            Some(exts) => exts.clone(),
            None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.max_line_length == Some(0) {
        anyhow::bail!("max_line_length must be positive");
    }

    if let Some(exts) = &config.extensions {
        if exts.is_empty() {
            anyhow::bail!("extensions must not be empty");
        }
        for ext in exts {
            if ext.trim_start_matches('.').is_empty() {
                anyhow::bail!("invalid extension {:?}", ext);
            }
        }
    }

    for pattern in &config.exclude {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid exclude pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
