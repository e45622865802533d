//! `llmcsv`: run every `text` value of a CSV through a local language model.
//!
//! Writes `input,response` rows to `<input>_result.csv` (or `--output`) and prints
//! a transcript of the responses.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::{debug, warn};

use llmcsv::batch::{BatchEvent, run_batch};
use llmcsv::core::settings::{RequestedSettings, Settings};
use llmcsv::core::transcript::{failure_line, progress_line, render_transcript};
use llmcsv::exit_codes;
use llmcsv::io::config::load_config;
use llmcsv::io::runtime::CommandRuntime;
use llmcsv::logging;

#[derive(Parser, Debug)]
#[command(
    name = "llmcsv",
    version,
    about = "Send each 'text' value of a CSV, with an instruction, to a local language model"
)]
#[command(group(
    ArgGroup::new("instruction")
        .required(true)
        .args(["prompt", "prompt_file"])
))]
struct Cli {
    /// Input CSV with a header row containing a `text` column.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: PathBuf,

    /// Instruction sent to the model ahead of every row.
    #[arg(short = 'p', long)]
    prompt: Option<String>,

    /// File containing the instruction (trimmed).
    #[arg(short = 'P', long, value_name = "PATH")]
    prompt_file: Option<PathBuf>,

    /// Output CSV path. Defaults to the input name with `_result.csv`.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Model name passed to the runtime. Defaults to `default_model` from the config (`phi4`).
    #[arg(short, long)]
    model: Option<String>,

    /// Optional TOML config for the runtime command and default model.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_requested(self) -> RequestedSettings {
        RequestedSettings {
            input: self.file,
            prompt: self.prompt,
            prompt_file: self.prompt_file,
            output: self.output,
            model: self.model,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init();
    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(exit_codes::FAILED);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).context("load config")?;
    let settings = Settings::resolve(cli.into_requested(), &config)?;
    debug!(?settings, "resolved settings");

    let runtime = CommandRuntime::new(&settings.runtime);
    let outcome = run_batch(&settings, &runtime, |event| match event {
        BatchEvent::RowStarted { text, .. } => println!("{}", progress_line(text)),
        BatchEvent::RowFailed { code, stderr, .. } => {
            eprintln!("{}", failure_line(*code, stderr));
        }
    })?;

    if outcome.failed_rows > 0 {
        warn!(
            failed_rows = outcome.failed_rows,
            "some rows were recorded with an empty response"
        );
    }
    print!("{}", render_transcript(&outcome.output_path, &outcome.records));
    Ok(())
}
