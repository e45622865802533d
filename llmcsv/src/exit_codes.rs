//! Stable exit codes for the `llmcsv` binary.

/// All rows were processed and the output file was written.
pub const OK: i32 = 0;
/// A prompt file, input CSV, config file or output path could not be used.
pub const FAILED: i32 = 1;
/// Invalid command-line usage (clap reports these itself with the same code).
pub const USAGE: i32 = 2;
