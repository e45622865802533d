//! Optional TOML configuration for the model runtime.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Tool configuration (TOML).
///
/// Missing fields default to the local Ollama setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LlmCsvConfig {
    /// Model used when `--model` is not given.
    pub default_model: String,

    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Command prefix for the model runtime. The model name and prompt are appended
    /// as the final two arguments (e.g. `["ollama","run"]`).
    pub command: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command: vec!["ollama".to_string(), "run".to_string()],
        }
    }
}

impl Default for LlmCsvConfig {
    fn default() -> Self {
        Self {
            default_model: "phi4".to_string(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl LlmCsvConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_model.trim().is_empty() {
            return Err(anyhow!("default_model must not be empty"));
        }
        if self.runtime.command.is_empty() || self.runtime.command[0].trim().is_empty() {
            return Err(anyhow!("runtime.command must be a non-empty array"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// With no path, returns `LlmCsvConfig::default()`. An explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<LlmCsvConfig> {
    let Some(path) = path else {
        let cfg = LlmCsvConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    };
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LlmCsvConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_path_returns_default() {
        let cfg = load_config(None).expect("load");
        assert_eq!(cfg, LlmCsvConfig::default());
        assert_eq!(cfg.runtime.command, vec!["ollama", "run"]);
    }

    #[test]
    fn load_missing_file_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_config(Some(&temp.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("llmcsv.toml");
        fs::write(&path, "default_model = \"llama3\"\n").expect("write");
        let cfg = load_config(Some(&path)).expect("load");
        assert_eq!(cfg.default_model, "llama3");
        assert_eq!(cfg.runtime, RuntimeConfig::default());
    }

    #[test]
    fn rejects_empty_command() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("llmcsv.toml");
        fs::write(&path, "[runtime]\ncommand = []\n").expect("write");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("runtime.command"));
    }
}
