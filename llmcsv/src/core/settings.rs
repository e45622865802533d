//! One-time resolution of command-line choices into immutable run settings.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::io::config::{LlmCsvConfig, RuntimeConfig};

/// Suffix appended to the input file stem when no output path is given.
pub const RESULT_SUFFIX: &str = "_result.csv";

/// Where the user instruction comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// Instruction given on the command line, used verbatim.
    Inline(String),
    /// Instruction stored in a UTF-8 file; surrounding whitespace is trimmed.
    File(PathBuf),
}

/// Raw, possibly-absent choices as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestedSettings {
    pub input: PathBuf,
    pub prompt: Option<String>,
    pub prompt_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub model: Option<String>,
}

/// Everything a batch run needs, fixed before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub prompt: PromptSource,
    pub model: String,
    pub runtime: RuntimeConfig,
}

impl Settings {
    /// Apply defaults from `config` to `requested`.
    ///
    /// Exactly one of `prompt` / `prompt_file` must be present.
    pub fn resolve(requested: RequestedSettings, config: &LlmCsvConfig) -> Result<Self> {
        let prompt = match (requested.prompt, requested.prompt_file) {
            (Some(text), None) => PromptSource::Inline(text),
            (None, Some(path)) => PromptSource::File(path),
            (Some(_), Some(_)) => bail!("--prompt and --prompt-file are mutually exclusive"),
            (None, None) => bail!("one of --prompt or --prompt-file is required"),
        };
        let output_path = requested
            .output
            .unwrap_or_else(|| default_output_path(&requested.input));
        let model = requested
            .model
            .unwrap_or_else(|| config.default_model.clone());

        Ok(Self {
            input_path: requested.input,
            output_path,
            prompt,
            model,
            runtime: config.runtime.clone(),
        })
    }
}

/// `data.csv` -> `data_result.csv`, next to the input.
///
/// Only the last extension is replaced; an input without one just gains the suffix.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(RESULT_SUFFIX);
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested(prompt: Option<&str>, prompt_file: Option<&str>) -> RequestedSettings {
        RequestedSettings {
            input: PathBuf::from("data.csv"),
            prompt: prompt.map(str::to_string),
            prompt_file: prompt_file.map(PathBuf::from),
            output: None,
            model: None,
        }
    }

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(
            default_output_path(Path::new("data.csv")),
            PathBuf::from("data_result.csv")
        );
        assert_eq!(
            default_output_path(Path::new("in/batch.v2.csv")),
            PathBuf::from("in/batch.v2_result.csv")
        );
        assert_eq!(
            default_output_path(Path::new("notes")),
            PathBuf::from("notes_result.csv")
        );
    }

    #[test]
    fn resolve_applies_defaults() {
        let settings =
            Settings::resolve(requested(Some("Translate:"), None), &LlmCsvConfig::default())
                .expect("resolve");
        assert_eq!(settings.prompt, PromptSource::Inline("Translate:".to_string()));
        assert_eq!(settings.output_path, PathBuf::from("data_result.csv"));
        assert_eq!(settings.model, "phi4");
        assert_eq!(settings.runtime.command, vec!["ollama", "run"]);
    }

    #[test]
    fn explicit_values_win_over_config() {
        let mut req = requested(None, Some("prompt.txt"));
        req.output = Some(PathBuf::from("out.csv"));
        req.model = Some("llama3".to_string());
        let config = LlmCsvConfig {
            default_model: "mistral".to_string(),
            ..LlmCsvConfig::default()
        };
        let settings = Settings::resolve(req, &config).expect("resolve");
        assert_eq!(settings.prompt, PromptSource::File(PathBuf::from("prompt.txt")));
        assert_eq!(settings.output_path, PathBuf::from("out.csv"));
        assert_eq!(settings.model, "llama3");
    }

    #[test]
    fn config_model_used_when_flag_absent() {
        let config = LlmCsvConfig {
            default_model: "mistral".to_string(),
            ..LlmCsvConfig::default()
        };
        let settings = Settings::resolve(requested(Some("x"), None), &config).expect("resolve");
        assert_eq!(settings.model, "mistral");
    }

    #[test]
    fn prompt_sources_are_exclusive_and_required() {
        let config = LlmCsvConfig::default();
        let both = Settings::resolve(requested(Some("x"), Some("p.txt")), &config).unwrap_err();
        assert!(both.to_string().contains("mutually exclusive"));
        let neither = Settings::resolve(requested(None, None), &config).unwrap_err();
        assert!(neither.to_string().contains("required"));
    }
}
