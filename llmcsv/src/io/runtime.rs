//! Model runtime abstraction.
//!
//! The [`ModelRuntime`] trait decouples the batch loop from the actual
//! text-generation backend (by default `ollama run`). Tests use scripted
//! runtimes that return predetermined outcomes without spawning processes.

use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use crate::io::config::RuntimeConfig;
use crate::io::process::run_command;

/// Outcome of one model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The runtime exited successfully; holds its trimmed stdout.
    Succeeded(String),
    /// The runtime exited with a non-zero status.
    Failed { code: Option<i32>, stderr: String },
}

impl Invocation {
    /// Response text to record for this invocation; failures degrade to `""`.
    pub fn into_response(self) -> String {
        match self {
            Invocation::Succeeded(text) => text,
            Invocation::Failed { .. } => String::new(),
        }
    }
}

/// Abstraction over text-generation backends.
pub trait ModelRuntime {
    /// Run the model once with `prompt` and wait for it to finish.
    ///
    /// `Err` is reserved for failures to run the backend at all; a backend that ran
    /// and reported failure yields `Ok(Invocation::Failed { .. })`.
    fn generate(&self, model: &str, prompt: &str) -> Result<Invocation>;
}

/// Runtime that spawns a local CLI, passing the model and prompt as arguments.
#[derive(Debug, Clone)]
pub struct CommandRuntime {
    command: Vec<String>,
}

impl CommandRuntime {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            command: config.command.clone(),
        }
    }

    fn build_command(&self, model: &str, prompt: &str) -> Command {
        let (program, prefix) = match self.command.split_first() {
            Some((program, prefix)) => (program.as_str(), prefix),
            None => ("ollama", &[][..]),
        };
        let mut cmd = Command::new(program);
        cmd.args(prefix).arg(model).arg(prompt);
        cmd
    }
}

impl ModelRuntime for CommandRuntime {
    #[instrument(skip_all, fields(model = %model, prompt_bytes = prompt.len()))]
    fn generate(&self, model: &str, prompt: &str) -> Result<Invocation> {
        let cmd = self.build_command(model, prompt);
        let output = run_command(cmd).context("run model runtime")?;

        if !output.status.success() {
            warn!(exit_code = ?output.status.code(), "model runtime failed");
            return Ok(Invocation::Failed {
                code: output.status.code(),
                stderr: output.stderr_lossy(),
            });
        }

        let response = output.stdout_lossy().trim().to_string();
        debug!(response_bytes = response.len(), "model runtime completed");
        Ok(Invocation::Succeeded(response))
    }
}
