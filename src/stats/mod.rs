//! Aggregated diff statistics and their merge.

mod result;


pub use result::{DiffStats, FileStats};
