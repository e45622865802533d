//! Orchestration for one pass over an input CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::core::settings::Settings;
use crate::core::types::ResultRecord;
use crate::io::prompt::{PromptComposer, load_instruction};
use crate::io::reader::{TEXT_COLUMN, TextRows};
use crate::io::runtime::{Invocation, ModelRuntime};
use crate::io::writer::write_results;

/// Per-row notifications emitted while the batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent<'a> {
    /// About to send the row (1-indexed among non-empty rows) to the model.
    RowStarted { row: usize, text: &'a str },
    /// The runtime exited non-zero; the row is recorded with an empty response.
    RowFailed {
        row: usize,
        code: Option<i32>,
        stderr: &'a str,
    },
}

/// Result of a completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub output_path: PathBuf,
    pub records: Vec<ResultRecord>,
    /// Rows whose runtime call failed and were degraded to an empty response.
    pub failed_rows: usize,
}

/// Send every non-empty `text` value to the model, in file order, and write the results.
///
/// The instruction and the input header are validated before the first model call.
/// Records are held in memory and written once at the end, so an input error
/// leaves no output file behind.
#[instrument(skip_all, fields(input = %settings.input_path.display(), model = %settings.model))]
pub fn run_batch<M: ModelRuntime, F: FnMut(&BatchEvent<'_>)>(
    settings: &Settings,
    runtime: &M,
    mut on_event: F,
) -> Result<BatchOutcome> {
    let instruction = load_instruction(&settings.prompt).context("load prompt")?;
    let composer = PromptComposer::new(instruction).context("build prompt template")?;
    let rows = TextRows::open(&settings.input_path, TEXT_COLUMN)?;

    let mut records = Vec::new();
    let mut failed_rows = 0usize;
    for (idx, text) in rows.enumerate() {
        let text = text?;
        let row = idx + 1;
        on_event(&BatchEvent::RowStarted { row, text: &text });

        let prompt = composer.compose(&text)?;
        let invocation = runtime
            .generate(&settings.model, &prompt)
            .with_context(|| format!("invoke model for row {row}"))?;
        if let Invocation::Failed { code, stderr } = &invocation {
            failed_rows += 1;
            on_event(&BatchEvent::RowFailed {
                row,
                code: *code,
                stderr,
            });
        }
        debug!(row, "row processed");
        records.push(ResultRecord::new(text, invocation.into_response()));
    }

    write_results(&settings.output_path, &records)?;
    info!(
        output = %settings.output_path.display(),
        rows = records.len(),
        failed_rows,
        "batch complete"
    );

    Ok(BatchOutcome {
        output_path: settings.output_path.clone(),
        records,
        failed_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::PromptSource;
    use crate::error::LlmCsvError;
    use crate::io::config::RuntimeConfig;
    use crate::test_support::{ScriptedRuntime, write_input_csv};

    fn settings(dir: &std::path::Path, prompt: PromptSource) -> Settings {
        Settings {
            input_path: dir.join("data.csv"),
            output_path: dir.join("data_result.csv"),
            prompt,
            model: "phi4".to_string(),
            runtime: RuntimeConfig::default(),
        }
    }

    #[test]
    fn skips_blank_rows_and_keeps_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_input_csv(&temp.path().join("data.csv"), &["Hello", "", "World"]).expect("csv");
        let runtime = ScriptedRuntime::succeeding(&["Bonjour", "Monde"]);
        let settings = settings(temp.path(), PromptSource::Inline("Translate:".to_string()));

        let mut started = Vec::new();
        let outcome = run_batch(&settings, &runtime, |event| {
            if let BatchEvent::RowStarted { text, .. } = event {
                started.push(text.to_string());
            }
        })
        .expect("batch");

        assert_eq!(started, vec!["Hello", "World"]);
        assert_eq!(
            outcome.records,
            vec![
                ResultRecord::new("Hello", "Bonjour"),
                ResultRecord::new("World", "Monde"),
            ]
        );
        assert_eq!(outcome.failed_rows, 0);

        let calls = runtime.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "phi4");
        assert!(calls[0].1.starts_with("Translate:\n\n"));
        assert!(calls[0].1.contains("\nHello\n"));
    }

    #[test]
    fn failed_row_degrades_to_empty_and_continues() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_input_csv(&temp.path().join("data.csv"), &["a", "b", "c"]).expect("csv");
        let runtime = ScriptedRuntime::new(vec![
            Invocation::Succeeded("A".to_string()),
            Invocation::Failed {
                code: Some(1),
                stderr: "model crashed".to_string(),
            },
            Invocation::Succeeded("C".to_string()),
        ]);
        let settings = settings(temp.path(), PromptSource::Inline("Upper:".to_string()));

        let mut failures = Vec::new();
        let outcome = run_batch(&settings, &runtime, |event| {
            if let BatchEvent::RowFailed { row, code, stderr } = event {
                failures.push((*row, *code, stderr.to_string()));
            }
        })
        .expect("batch");

        assert_eq!(failures, vec![(2, Some(1), "model crashed".to_string())]);
        assert_eq!(outcome.failed_rows, 1);
        let responses: Vec<&str> = outcome.records.iter().map(|r| r.response.as_str()).collect();
        assert_eq!(responses, vec!["A", "", "C"]);
    }

    #[test]
    fn missing_column_writes_nothing_and_calls_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("data.csv"), "body\nHello\n").expect("csv");
        let runtime = ScriptedRuntime::succeeding(&[]);
        let settings = settings(temp.path(), PromptSource::Inline("x".to_string()));

        let err = run_batch(&settings, &runtime, |_| {}).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LlmCsvError>(),
            Some(LlmCsvError::MissingColumn { .. })
        ));
        assert!(runtime.calls().is_empty());
        assert!(!settings.output_path.exists());
    }

    #[test]
    fn missing_prompt_file_fails_before_reading_input() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runtime = ScriptedRuntime::succeeding(&[]);
        let settings = settings(
            temp.path(),
            PromptSource::File(temp.path().join("missing-prompt.txt")),
        );

        let err = run_batch(&settings, &runtime, |_| {}).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LlmCsvError>(),
            Some(LlmCsvError::PromptFileNotFound { .. })
        ));
    }
}
