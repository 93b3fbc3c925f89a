//! Error taxonomy for loading, filtering and aggregating trip data.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row (or the header) could not be turned into a trip record.
    /// `line` is the 1-based data line, 0 for the header.
    #[error("Parse error at line {line}, field '{field}': {reason}")]
    Parse {
        line: u64,
        field: String,
        reason: String,
    },

    #[error("Invalid {kind} '{value}'. Expected one of: {expected}")]
    Validation {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("Cannot compute {statistic} over an empty trip collection")]
    EmptyResult { statistic: &'static str },
}

impl BikeshareError {
    pub(crate) fn parse(line: u64, field: &str, reason: impl Into<String>) -> Self {
        BikeshareError::Parse {
            line,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        BikeshareError::Validation {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BikeshareError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
