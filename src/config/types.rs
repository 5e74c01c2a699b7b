//! Configuration types and defaults for diffstats.
//!
//! This module defines enums and default value functions used by the
//! Config struct.

use crate::calls::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How diff sources are fanned out across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Analyze sources one after another on the calling thread.
    Serial,
    /// One dedicated thread per source.
    PerFile,
    /// A pool bounded by the processor count (or `jobs`).
    #[default]
    PerCpu,
}

impl Strategy {
    /// Parse a strategy from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "serial" => Some(Self::Serial),
            "per_file" | "per-file" => Some(Self::PerFile),
            "per_cpu" | "per-cpu" => Some(Self::PerCpu),
            _ => None,
        }
    }
}

/// Which paths a renamed file is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilesPolicy {
    /// Record the post-change path only (the pre-change path for deletions).
    #[default]
    NewPath,
    /// Record both the pre-change and post-change paths.
    BothPaths,
}

/// Default extension to dialect map.
pub fn default_extensions() -> BTreeMap<String, Dialect> {
    let c_like = [".c", ".h", ".cc", ".cpp", ".cxx", ".hpp", ".hh"];

    c_like
        .iter()
        .map(|ext| (ext.to_string(), Dialect::C))
        .chain(std::iter::once((".py".to_string(), Dialect::Python)))
        .collect()
}

// Default value functions for serde
pub(crate) fn default_include_globs() -> Vec<String> {
    vec!["*".to_string()]
}
