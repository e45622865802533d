//! I/O helpers: files, the model runtime process, and configuration.

pub mod config;
pub mod process;
pub mod prompt;
pub mod reader;
pub mod runtime;
pub mod writer;
