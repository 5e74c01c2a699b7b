//! diffstats: structural statistics and call-site counts for unified diffs.
//!
//! A directory of diff files is parsed line by line through an explicit
//! state machine; every region's pre-change and post-change text is
//! tokenized and scanned for call sites in the dialect of the file's
//! extension. Sources are analyzed independently and their partial
//! [`DiffStats`](stats::DiffStats) merged, serially or in parallel.

pub mod calls;
pub mod cli;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod report;
pub mod stats;
pub mod tokenize;

#[cfg(test)]
mod test_support;

pub use engine::compute;
pub use error::{DiffStatsError, Result};
pub use stats::DiffStats;
