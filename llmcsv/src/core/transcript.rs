//! Console transcript printed after a batch run.

use std::fmt::Write;
use std::path::Path;

use crate::core::types::ResultRecord;

/// Line printed before a row is sent to the model.
pub fn progress_line(text: &str) -> String {
    format!("processing: {text}")
}

/// Diagnostic printed when the model runtime exits non-zero for a row.
pub fn failure_line(code: Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    };
    format!("error running model runtime ({status}): {}", stderr.trim_end())
}

/// Render the saved-path notice followed by every input/response pair, 1-indexed.
pub fn render_transcript(output_path: &Path, records: &[ResultRecord]) -> String {
    let mut buf = String::new();
    let _ = writeln!(buf, "\nsaved results to {}", output_path.display());
    buf.push_str("\n=== model responses ===\n");
    for (idx, record) in records.iter().enumerate() {
        let _ = writeln!(buf, "[row {}]", idx + 1);
        let _ = writeln!(buf, "  input:    {}", record.input);
        let _ = writeln!(buf, "  response: {}", record.response);
        buf.push('\n');
    }
    buf
}
