//! Call-site detection over code extracted from diff hunks.
//!
//! A call site is an identifier immediately followed by `(`, where the
//! identifier is not a keyword of the dialect and a dialect-specific guard on
//! the token before it holds. Dialects are selected by file extension through
//! a [`DialectRegistry`]; extensions with no registered dialect contribute no
//! call sites.

mod classifier;
mod dialect;
mod registry;


use std::collections::BTreeMap;

/// Call name to number of occurrences.
pub type CallCounts = BTreeMap<String, u64>;

pub use classifier::{count_calls, count_calls_into, merge_counts};
pub use dialect::{Dialect, DialectRules};
pub use registry::DialectRegistry;
