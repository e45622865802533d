//! Typed failures surfaced by the library.
//!
//! Orchestration code wraps these in `anyhow::Error`; `main` prints the whole
//! chain and exits with `exit_codes::FAILED`.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmCsvError {
    #[error("prompt file '{}' not found", path.display())]
    PromptFileNotFound { path: PathBuf },

    #[error("no permission to read prompt file '{}'", path.display())]
    PromptFilePermission { path: PathBuf },

    #[error("read prompt file '{}'", path.display())]
    PromptFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input file '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    #[error("no permission to read input file '{}'", path.display())]
    InputPermission { path: PathBuf },

    #[error("input file '{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("malformed CSV in '{}'", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no permission to write output file '{}'", path.display())]
    OutputPermission { path: PathBuf },

    #[error("write output file '{}'", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to start model runtime '{program}'")]
    RuntimeSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LlmCsvError {
    pub(crate) fn prompt_file(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::PromptFileNotFound { path },
            io::ErrorKind::PermissionDenied => Self::PromptFilePermission { path },
            _ => Self::PromptFileRead { path, source: err },
        }
    }

    pub(crate) fn input(path: &Path, err: csv::Error) -> Self {
        let path = path.to_path_buf();
        if let csv::ErrorKind::Io(io_err) = err.kind() {
            match io_err.kind() {
                io::ErrorKind::NotFound => return Self::InputNotFound { path },
                io::ErrorKind::PermissionDenied => return Self::InputPermission { path },
                _ => {}
            }
        }
        Self::MalformedInput { path, source: err }
    }

    pub(crate) fn output(path: &Path, err: csv::Error) -> Self {
        let path = path.to_path_buf();
        if let csv::ErrorKind::Io(io_err) = err.kind()
            && io_err.kind() == io::ErrorKind::PermissionDenied
        {
            return Self::OutputPermission { path };
        }
        Self::OutputWrite { path, source: err }
    }
}
