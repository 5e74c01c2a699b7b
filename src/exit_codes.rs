//! Exit code constants for the diffstats CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing input directory)
//! - 2: I/O failure (a diff source could not be read)
//! - 3: Configuration error
//! - 4: Internal failure (a worker panicked, rendering failed)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an input directory that does not exist.
pub const USER_ERROR: i32 = 1;

/// A diff source could not be opened or read.
pub const IO_FAILURE: i32 = 2;

/// The configuration file is unreadable or invalid.
pub const CONFIG_ERROR: i32 = 3;

/// A worker thread panicked while analyzing a source.
pub const INTERNAL_FAILURE: i32 = 4;
