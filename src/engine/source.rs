//! Named diff sources and directory discovery.

use crate::config::Config;
use crate::error::{DiffStatsError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// A named blob of unified-diff text.
pub trait DiffSource: Send + Sync {
    /// Name used in logs and for hunks that carry no file header.
    fn name(&self) -> &str;

    /// Read the full text. Invalid UTF-8 is replaced, not rejected.
    fn read(&self) -> Result<String>;
}

/// A diff stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

impl DiffSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path).map_err(|e| DiffStatsError::io(&self.path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A diff held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    text: String,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl DiffSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Include/exclude globs matched against source file names.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl SourceFilter {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            include: build_globset(&config.include_globs)?,
            exclude: build_globset(&config.exclude_globs)?,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.include.is_match(file_name) && !self.exclude.is_match(file_name)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let normalized = pattern.trim().replace('\\', "/");
        if normalized.is_empty() {
            continue;
        }
        let glob = Glob::new(&normalized).map_err(|e| {
            DiffStatsError::ConfigError(format!("invalid glob pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| DiffStatsError::ConfigError(format!("failed to build glob set: {}", e)))
}

/// List the regular files directly inside `dir` that pass the configured
/// filter, sorted by name.
pub fn discover_sources(dir: &Path, config: &Config) -> Result<Vec<FileSource>> {
    if !dir.is_dir() {
        return Err(DiffStatsError::UserError(format!(
            "diff directory '{}' does not exist or is not a directory",
            dir.display()
        )));
    }

    let filter = SourceFilter::from_config(config)?;
    let mut sources = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|e| DiffStatsError::io(dir, e))? {
        let entry = entry.map_err(|e| DiffStatsError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if filter.matches(&file_name) {
            sources.push(FileSource::new(path));
        } else {
            log::trace!("skipping {} (filtered by globs)", file_name);
        }
    }

    sources.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("found {} diff source(s) in {}", sources.len(), dir.display());
    Ok(sources)
}
