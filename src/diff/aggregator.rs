//! Hunk buffer lifecycle and per-hunk call classification.

use super::helpers::HunkHeader;
use crate::calls::{CallCounts, DialectRegistry};

/// The hunk currently being accumulated.
#[derive(Debug, Clone, Default)]
pub struct Hunk {
    pub header: Option<HunkHeader>,
    /// Context and deleted lines: the code as it was.
    pub before: String,
    /// Context and added lines: the code as it is.
    pub after: String,
}

/// Call sites found in one closed hunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HunkCalls {
    pub before: CallCounts,
    pub after: CallCounts,
    /// Sides whose extension had no registered dialect.
    pub unsupported: Vec<String>,
}

/// Owns the buffers of the open hunk.
///
/// At most one hunk is open at a time. Buffers are reused across hunks.
#[derive(Debug, Default)]
pub struct HunkAggregator {
    hunk: Hunk,
}

impl HunkAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.hunk.header.is_some()
    }

    /// Start a hunk. Any open hunk must have been closed first.
    pub fn open(&mut self, header: HunkHeader) {
        debug_assert!(!self.is_open(), "previous hunk was not closed");
        self.hunk.header = Some(header);
        self.hunk.before.clear();
        self.hunk.after.clear();
    }

    pub fn push_context(&mut self, text: &str) {
        push_line(&mut self.hunk.before, text);
        push_line(&mut self.hunk.after, text);
    }

    pub fn push_deleted(&mut self, text: &str) {
        push_line(&mut self.hunk.before, text);
    }

    pub fn push_added(&mut self, text: &str) {
        push_line(&mut self.hunk.after, text);
    }

    pub fn before(&self) -> &str {
        &self.hunk.before
    }

    pub fn after(&self) -> &str {
        &self.hunk.after
    }

    /// Close the open hunk, classifying each buffer with its side's dialect,
    /// and reset both buffers. Returns `None` when no hunk was open.
    pub fn close(
        &mut self,
        registry: &DialectRegistry,
        before_extension: &str,
        after_extension: &str,
    ) -> Option<HunkCalls> {
        self.hunk.header.take()?;

        let mut calls = HunkCalls::default();
        if !registry.count_calls_into(&self.hunk.before, before_extension, &mut calls.before) {
            calls.unsupported.push(before_extension.to_string());
        }
        if !registry.count_calls_into(&self.hunk.after, after_extension, &mut calls.after)
            && after_extension != before_extension
        {
            calls.unsupported.push(after_extension.to_string());
        }

        self.hunk.before.clear();
        self.hunk.after.clear();

        Some(calls)
    }
}

fn push_line(buffer: &mut String, text: &str) {
    buffer.push_str(text);
    buffer.push('\n');
}
