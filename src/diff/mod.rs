//! Unified diff parsing for diffstats.
//!
//! Every line of diff text is classified as a file header, a region header
//! or hunk content by an explicit state machine ([`transition`]). A
//! [`DiffParser`] applies those events: it tracks the current file pair,
//! counts regions and added/deleted lines, and hands each closed hunk's
//! before/after code to the call-site classifier.
//!
//! Supported input:
//! - `diff --git` sections with `---`/`+++` pairs, including `/dev/null`
//!   for added and deleted files
//! - plain unified diffs (`---`/`+++` pairs without `diff --git`), with or
//!   without tab-separated timestamps
//! - git extended headers (`rename from`/`rename to`, mode and index lines)
//! - region headers with or without `,<len>` and with trailing section text
//!
//! Nothing is rejected: lines outside any grammar are ignored.

mod aggregator;
mod file;
mod helpers;
mod machine;
mod parser;

#[cfg(test)]
mod tests;

// Re-export public API
pub use aggregator::{Hunk, HunkAggregator, HunkCalls};
pub use file::FileEntry;
pub use helpers::{DEV_NULL, DEV_NULL_EXTENSION, HunkHeader, extension_of};
pub use machine::{LineEvent, ParseState, Transition, transition};
pub use parser::{DiffParser, analyze_diff};
