//! Send each row of a CSV column through a local language model.
//!
//! The crate reads the `text` column of an input CSV, wraps every non-empty value
//! in a user instruction, runs a local model CLI (by default `ollama run`) once per
//! row, and writes `input,response` pairs to a new CSV. The architecture keeps a
//! strict separation:
//!
//! - **[`core`]**: Pure logic (settings resolution, output naming, transcript).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (CSV files, prompt files, child processes).
//!   The model runtime sits behind a trait so tests can script it.
//!
//! [`batch`] coordinates the two for the CLI: rows are processed strictly one at a
//! time, in file order, and a failed model call degrades to an empty response.

pub mod batch;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
