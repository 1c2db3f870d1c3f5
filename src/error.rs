use serde::Serialize;
use thiserror::Error;

/// Why a single record was rejected during validation.
///
/// The `Display` output is the stable, human-readable reason string attached
/// to rejected records; consumers match on these message substrings.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum RejectReason {
    #[error("Missing required field '{0}'")]
    MissingRequiredField(String),

    #[error("Invalid data type for field '{0}'")]
    InvalidFieldType(String),

    #[error("Empty required field '{0}'")]
    EmptyRequiredField(String),
}

impl From<RejectReason> for String {
    fn from(reason: RejectReason) -> Self {
        reason.to_string()
    }
}

impl RejectReason {
    /// The name of the field that caused the rejection.
    pub fn field(&self) -> &str {
        match self {
            RejectReason::MissingRequiredField(field)
            | RejectReason::InvalidFieldType(field)
            | RejectReason::EmptyRequiredField(field) => field,
        }
    }
}

/// Source-level ingestion failures. These are contained inside the loaders
/// (logged, with empty or partial results) and never cross the validator
/// boundary.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
