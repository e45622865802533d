//! Shared value types.

use serde::{Deserialize, Serialize};

/// One processed row: the trimmed input text and the model's response.
///
/// Field order matches the output CSV columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub input: String,
    pub response: String,
}

impl ResultRecord {
    pub fn new(input: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            response: response.into(),
        }
    }
}
