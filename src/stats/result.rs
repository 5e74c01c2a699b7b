//! The externally visible result of analyzing one or more diffs.

use crate::calls::{CallCounts, merge_counts};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::iter::Sum;
use std::ops::AddAssign;

/// Line and region counters for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub regions: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: FileStats) {
        self.regions += other.regions;
        self.lines_added += other.lines_added;
        self.lines_deleted += other.lines_deleted;
    }
}

/// Statistics over a set of diffs.
///
/// Partial results from independent workers combine with [`DiffStats::merge`],
/// which is associative and commutative: counters add, sets union, and call
/// tables sum per key. The empty value (`Default`) is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Paths of the files touched by the diffs.
    pub files: BTreeSet<String>,
    /// Extensions (or base names) of those files.
    pub file_extensions: BTreeSet<String>,
    /// Number of `@@` regions.
    pub regions: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
    /// Call sites seen in the pre-change side of hunks.
    pub function_calls_before: CallCounts,
    /// Call sites seen in the post-change side of hunks.
    pub function_calls_after: CallCounts,
    /// Per-file breakdown; its counters sum to the global ones.
    pub per_file: BTreeMap<String, FileStats>,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `other` into `self`.
    pub fn merge(&mut self, other: DiffStats) {
        self.files.extend(other.files);
        self.file_extensions.extend(other.file_extensions);
        self.regions += other.regions;
        self.lines_added += other.lines_added;
        self.lines_deleted += other.lines_deleted;
        merge_counts(&mut self.function_calls_before, other.function_calls_before);
        merge_counts(&mut self.function_calls_after, other.function_calls_after);
        for (path, stats) in other.per_file {
            *self.per_file.entry(path).or_default() += stats;
        }
    }

    /// By-value form of [`DiffStats::merge`], convenient for reductions.
    pub fn merged(mut self, other: DiffStats) -> Self {
        self.merge(other);
        self
    }

    pub fn record_file(&mut self, path: &str) {
        self.files.insert(path.to_string());
    }

    pub fn record_extension(&mut self, extension: &str) {
        self.file_extensions.insert(extension.to_string());
    }

    pub fn record_region(&mut self, file: &str) {
        self.regions += 1;
        self.file_entry(file).regions += 1;
    }

    pub fn record_added(&mut self, file: &str) {
        self.lines_added += 1;
        self.file_entry(file).lines_added += 1;
    }

    pub fn record_deleted(&mut self, file: &str) {
        self.lines_deleted += 1;
        self.file_entry(file).lines_deleted += 1;
    }

    pub fn record_calls(&mut self, before: CallCounts, after: CallCounts) {
        merge_counts(&mut self.function_calls_before, before);
        merge_counts(&mut self.function_calls_after, after);
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn file_entry(&mut self, file: &str) -> &mut FileStats {
        self.per_file.entry(file.to_string()).or_default()
    }
}

impl AddAssign for DiffStats {
    fn add_assign(&mut self, other: DiffStats) {
        self.merge(other);
    }
}

impl Sum for DiffStats {
    fn sum<I: Iterator<Item = DiffStats>>(iter: I) -> Self {
        iter.fold(DiffStats::default(), DiffStats::merged)
    }
}
