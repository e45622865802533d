//! Deterministic, pure logic shared by the CLI.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod settings;
pub mod transcript;
pub mod types;
