//! Input CSV reader yielding the non-empty values of one column.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Result;
use csv::{ReaderBuilder, StringRecordsIntoIter};
use tracing::debug;

use crate::error::LlmCsvError;

/// Column every input file must provide.
pub const TEXT_COLUMN: &str = "text";

/// Single forward pass over the trimmed, non-empty values of one column.
///
/// Rows whose value is blank (or missing, for short rows) are skipped. Reopen the
/// file to read it again.
pub struct TextRows<R: Read> {
    records: StringRecordsIntoIter<R>,
    column_index: usize,
    path: PathBuf,
}

impl TextRows<File> {
    /// Open `path` and position the reader after its header row.
    pub fn open(path: &Path, column: &str) -> Result<Self> {
        let reader = File::open(path)
            .map_err(|err| LlmCsvError::input(path, csv::Error::from(err)))?;
        let rows = Self::from_reader(reader, path, column)?;
        debug!(path = %path.display(), column, "opened input csv");
        Ok(rows)
    }
}

impl<R: Read> TextRows<R> {
    /// Wrap any reader; `path` is only used in error messages.
    pub fn from_reader(reader: R, path: &Path, column: &str) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|err| LlmCsvError::input(path, err))?;
        let column_index = headers.iter().collect::<Vec<_>>().iter().rposition(|name| *name == column).ok_or_else(|| {
            LlmCsvError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            }
        })?;
        Ok(Self {
            records: csv_reader.into_records(),
            column_index,
            path: path.to_path_buf(),
        })
    }
}

impl<R: Read> Iterator for TextRows<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            let record = match record {
                Ok(record) => record,
                Err(err) => return Some(Err(LlmCsvError::input(&self.path, err).into())),
            };
            let text = record.get(self.column_index).unwrap_or_default().trim();
            if !text.is_empty() {
                return Some(Ok(text.to_string()));
            }
        }
        None
    }
}
