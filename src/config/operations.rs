//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{DiffStatsError, Result};
use globset::Glob;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(DiffStatsError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DiffStatsError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        log::debug!("Loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DiffStatsError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DiffStatsError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `extensions` keys are non-empty; a key with a dot must start with it
    ///   (`.py`), a key without one is a full base name (`Makefile`)
    /// - `extra_keywords` entries look like identifiers
    /// - every include/exclude glob compiles
    pub fn validate(&self) -> Result<()> {
        for ext in self.extensions.keys() {
            if ext.is_empty() {
                return Err(DiffStatsError::ConfigError(
                    "extensions keys must be non-empty".to_string(),
                ));
            }
            if ext.contains('.') && !ext.starts_with('.') {
                return Err(DiffStatsError::ConfigError(format!(
                    "extensions key '{}' must start with '.' (e.g. '.{}')",
                    ext,
                    ext.rsplit('.').next().unwrap_or_default()
                )));
            }
        }

        for (dialect, keywords) in &self.extra_keywords {
            if let Some(bad) = keywords.iter().find(|k| !is_identifier(k)) {
                return Err(DiffStatsError::ConfigError(format!(
                    "extra_keywords.{} entry '{}' is not an identifier",
                    dialect, bad
                )));
            }
        }

        for pattern in self.include_globs.iter().chain(&self.exclude_globs) {
            Glob::new(pattern).map_err(|e| {
                DiffStatsError::ConfigError(format!("invalid glob pattern '{}': {}", pattern, e))
            })?;
        }

        Ok(())
    }

    /// Worker count to use for the `per_cpu` strategy, if pinned.
    pub fn pinned_jobs(&self) -> Option<usize> {
        (self.jobs > 0).then_some(self.jobs)
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
