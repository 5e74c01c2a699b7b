//! Drives the state machine over one diff source.

use super::aggregator::HunkAggregator;
use super::file::FileEntry;
use super::helpers::{DEV_NULL_EXTENSION, extension_of, normalize_path};
use super::machine::{LineEvent, ParseState, transition};
use crate::calls::DialectRegistry;
use crate::config::FilesPolicy;
use crate::stats::DiffStats;
use std::collections::BTreeSet;

/// Incremental parser for a single diff source.
///
/// Owns its state, hunk buffers and partial [`DiffStats`]; nothing is shared
/// with other parsers except the read-only registry.
#[derive(Debug)]
pub struct DiffParser<'r> {
    source_name: String,
    registry: &'r DialectRegistry,
    policy: FilesPolicy,
    state: ParseState,
    file: Option<FileEntry>,
    hunks: HunkAggregator,
    stats: DiffStats,
    unsupported_seen: BTreeSet<String>,
}

impl<'r> DiffParser<'r> {
    pub fn new(source_name: &str, registry: &'r DialectRegistry, policy: FilesPolicy) -> Self {
        Self {
            source_name: source_name.to_string(),
            registry,
            policy,
            state: ParseState::default(),
            file: None,
            hunks: HunkAggregator::new(),
            stats: DiffStats::new(),
            unsupported_seen: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Feed every line of `text`.
    pub fn feed(&mut self, text: &str) {
        for line in text.lines() {
            self.feed_line(line);
        }
    }

    /// Feed one line (without its terminator).
    pub fn feed_line(&mut self, line: &str) {
        let step = transition(self.state, line);

        if step.closes_hunk {
            self.close_hunk();
        }

        match step.event {
            LineEvent::GitHeader { old_path, new_path } => {
                self.close_file();
                self.file = Some(FileEntry::new(old_path, new_path));
            }
            LineEvent::OldFile(path) => {
                // A `---` after this section's `+++` starts a section of a
                // plain unified diff that has no `diff --git` line. Hunks
                // seen before any header belong to their own section.
                let same_section = self
                    .file
                    .as_ref()
                    .is_some_and(|e| e.from_header && !e.has_new_header);
                if same_section && let Some(entry) = self.file.as_mut() {
                    entry.old_path = path;
                } else {
                    self.close_file();
                    self.file = Some(FileEntry::new(path.clone(), path));
                }
            }
            LineEvent::NewFile(path) => {
                if self.file.as_ref().is_some_and(|e| !e.from_header) {
                    self.close_file();
                }
                let entry = self
                    .file
                    .get_or_insert_with(|| FileEntry::new(path.clone(), path.clone()));
                entry.new_path = path;
                entry.has_new_header = true;
            }
            LineEvent::RenameFrom(path) => {
                self.current_file().old_path = normalize_path(path);
            }
            LineEvent::RenameTo(path) => {
                self.current_file().new_path = normalize_path(path);
            }
            LineEvent::Region(header) => {
                let file = self.current_file().canonical_path().to_string();
                self.stats.record_region(&file);
                self.hunks.open(header);
            }
            LineEvent::Context(text) => self.hunks.push_context(text),
            LineEvent::Deleted(text) => {
                let file = self.current_file().canonical_path().to_string();
                self.stats.record_deleted(&file);
                self.hunks.push_deleted(text);
            }
            LineEvent::Added(text) => {
                let file = self.current_file().canonical_path().to_string();
                self.stats.record_added(&file);
                self.hunks.push_added(text);
            }
            LineEvent::NoNewlineMarker | LineEvent::Metadata => {}
            LineEvent::Unrecognized => {
                log::trace!("{}: ignoring line {:?}", self.source_name, line);
            }
        }

        self.state = step.next;
    }

    /// Flush the open hunk and file section and return the partial result.
    pub fn finish(mut self) -> DiffStats {
        self.close_hunk();
        self.close_file();
        self.stats
    }

    fn current_file(&mut self) -> &mut FileEntry {
        let source_name = &self.source_name;
        self.file
            .get_or_insert_with(|| FileEntry::headerless(source_name))
    }

    fn close_hunk(&mut self) {
        if !self.hunks.is_open() {
            return;
        }

        let entry = self.current_file();
        let before_ext = entry.before_extension();
        let after_ext = entry.after_extension();

        if let Some(calls) = self.hunks.close(self.registry, &before_ext, &after_ext) {
            for ext in calls.unsupported {
                if ext != DEV_NULL_EXTENSION && self.unsupported_seen.insert(ext.clone()) {
                    log::debug!(
                        "{}: no dialect registered for '{}', skipping call sites",
                        self.source_name,
                        ext
                    );
                }
            }
            self.stats.record_calls(calls.before, calls.after);
        }
    }

    fn close_file(&mut self) {
        let Some(entry) = self.file.take() else {
            return;
        };

        for path in entry.recorded_paths(self.policy) {
            self.stats.record_file(path);
            self.stats.record_extension(&extension_of(path));
        }
    }
}

/// Analyze one complete diff text.
pub fn analyze_diff(
    source_name: &str,
    text: &str,
    registry: &DialectRegistry,
    policy: FilesPolicy,
) -> DiffStats {
    let mut parser = DiffParser::new(source_name, registry, policy);
    parser.feed(text);
    parser.finish()
}
