//! Test-only helpers: a scripted model runtime and scratch workspaces.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::runtime::{Invocation, ModelRuntime};

/// Runtime that replays queued invocations and records every call.
pub struct ScriptedRuntime {
    queue: RefCell<VecDeque<Invocation>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedRuntime {
    pub fn new(invocations: Vec<Invocation>) -> Self {
        Self {
            queue: RefCell::new(invocations.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Queue one successful response per entry.
    pub fn succeeding(responses: &[&str]) -> Self {
        Self::new(
            responses
                .iter()
                .map(|r| Invocation::Succeeded(r.to_string()))
                .collect(),
        )
    }

    /// `(model, prompt)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl ModelRuntime for ScriptedRuntime {
    fn generate(&self, model: &str, prompt: &str) -> Result<Invocation> {
        self.calls
            .borrow_mut()
            .push((model.to_string(), prompt.to_string()));
        self.queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted runtime exhausted"))
    }
}

/// Write a single-column `text` CSV with one row per value.
pub fn write_input_csv(path: &Path, texts: &[&str]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    writer.write_record(["text"])?;
    for text in texts {
        writer.write_record([*text])?;
    }
    writer.flush()?;
    Ok(())
}

/// Temporary directory holding the files of one CLI run.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create tempdir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_input(&self, name: &str, texts: &[&str]) -> Result<PathBuf> {
        let path = self.join(name);
        write_input_csv(&path, texts)?;
        Ok(path)
    }

    /// Write a config whose runtime is `sh -c <script>`; the model arrives as `$0`
    /// and the prompt as `$1`.
    pub fn write_shell_runtime_config(&self, script: &str) -> Result<PathBuf> {
        let config = crate::io::config::LlmCsvConfig {
            runtime: crate::io::config::RuntimeConfig {
                command: vec!["sh".to_string(), "-c".to_string(), script.to_string()],
            },
            ..Default::default()
        };
        let contents = toml::to_string_pretty(&config).context("serialize config")?;
        self.write("llmcsv.toml", &contents)
    }
}
