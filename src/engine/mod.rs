//! Fan-out / fan-in over diff sources.
//!
//! Each source is analyzed by its own [`DiffParser`](crate::diff::DiffParser)
//! into a private partial [`DiffStats`](crate::stats::DiffStats); partials are
//! combined only after their worker has finished, so no counter is shared
//! while work is in flight. The merge is associative and commutative, which
//! makes the final result independent of scheduling.
//!
//! The first source that cannot be read aborts the run.

mod runner;
mod source;


pub use runner::{Engine, compute};
pub use source::{DiffSource, FileSource, MemorySource, SourceFilter, discover_sources};
