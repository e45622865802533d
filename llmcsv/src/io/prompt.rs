//! Instruction loading and per-row prompt rendering.

use std::fs;
use std::path::Path;

use anyhow::Result;
use minijinja::{Environment, context};
use tracing::debug;

use crate::core::settings::PromptSource;
use crate::error::LlmCsvError;

const ROW_TEMPLATE: &str = include_str!("prompts/row.md");

/// Read the instruction text for `source`.
pub fn load_instruction(source: &PromptSource) -> Result<String> {
    match source {
        PromptSource::Inline(text) => Ok(text.clone()),
        PromptSource::File(path) => read_prompt_file(path),
    }
}

fn read_prompt_file(path: &Path) -> Result<String> {
    let contents =
        fs::read_to_string(path).map_err(|err| LlmCsvError::prompt_file(path, err))?;
    debug!(path = %path.display(), bytes = contents.len(), "loaded prompt file");
    Ok(contents.trim().to_string())
}

/// Renders the prompt sent to the model for each row.
///
/// The instruction is fixed at construction; every row is wrapped in the same
/// delimiter lines so the model can tell the subject text apart from the instruction.
pub struct PromptComposer {
    env: Environment<'static>,
    instruction: String,
}

impl PromptComposer {
    pub fn new(instruction: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template("row", ROW_TEMPLATE)?;
        Ok(Self {
            env,
            instruction: instruction.into(),
        })
    }

    /// Compose the full prompt for one row of (already trimmed) text.
    pub fn compose(&self, text: &str) -> Result<String> {
        let template = self.env.get_template("row")?;
        let rendered = template.render(context! {
            instruction => self.instruction.as_str(),
            text => text,
        })?;
        Ok(rendered)
    }
}
