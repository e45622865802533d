//! Output CSV writer for `(input, response)` records.

use std::path::Path;

use anyhow::Result;
use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::core::types::ResultRecord;
use crate::error::LlmCsvError;

/// Header row of every output file.
pub const OUTPUT_HEADER: [&str; 2] = ["input", "response"];

/// Create or truncate `path` and write the header followed by one row per record.
///
/// The header is written even when `records` is empty. A failure partway leaves
/// the file as the underlying write left it.
pub fn write_results(path: &Path, records: &[ResultRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|err| LlmCsvError::output(path, err))?;

    writer
        .write_record(OUTPUT_HEADER)
        .map_err(|err| LlmCsvError::output(path, err))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|err| LlmCsvError::output(path, err))?;
    }
    writer
        .flush()
        .map_err(|err| LlmCsvError::output(path, csv::Error::from(err)))?;

    debug!(path = %path.display(), rows = records.len(), "wrote output csv");
    Ok(())
}
