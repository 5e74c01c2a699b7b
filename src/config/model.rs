//! Config struct definition and default implementation.

use super::types::*;
use crate::calls::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a diffstats run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Input selection
    // =========================================================================
    /// Glob patterns selecting diff sources inside the input directory.
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,

    /// Glob patterns removing sources that matched `include_globs`.
    #[serde(default)]
    pub exclude_globs: Vec<String>,

    // =========================================================================
    // Scheduling
    // =========================================================================
    /// Fan-out strategy.
    #[serde(default)]
    pub strategy: Strategy,

    /// Worker count for the `per_cpu` strategy (0 = number of processors).
    #[serde(default)]
    pub jobs: usize,

    // =========================================================================
    // Classification
    // =========================================================================
    /// File extension (with leading dot) or full base name to dialect.
    #[serde(default = "default_extensions")]
    pub extensions: BTreeMap<String, Dialect>,

    /// Keywords added to each dialect's built-in set.
    #[serde(default)]
    pub extra_keywords: BTreeMap<Dialect, Vec<String>>,

    /// Rename attribution for the `files` set.
    #[serde(default)]
    pub files_policy: FilesPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            strategy: Strategy::default(),
            jobs: 0,
            extensions: default_extensions(),
            extra_keywords: BTreeMap::new(),
            files_policy: FilesPolicy::default(),
        }
    }
}
