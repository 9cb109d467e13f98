//! Record decoding errors.

use seal_recovery::SealError;
use thiserror::Error;

/// Errors raised while turning a JSON block record into typed values.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Input is not a block record or an array of block records.
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A byte field is not valid hex.
    #[error("Invalid hex in {field}: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// A fixed-width field decoded to the wrong number of bytes.
    #[error("Invalid width for {field}: expected {expected} bytes, got {actual}")]
    InvalidWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A numeric field is neither a JSON number nor a parsable quantity.
    #[error("Invalid quantity in {field}: {value:?}")]
    InvalidQuantity { field: &'static str, value: String },
}

impl RecordError {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Json(_) => "Json",
            RecordError::InvalidHex { .. } => "InvalidHex",
            RecordError::InvalidWidth { .. } => "InvalidWidth",
            RecordError::InvalidQuantity { .. } => "InvalidQuantity",
        }
    }

    /// The JSON field that triggered the error, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::Json(_) => None,
            RecordError::InvalidHex { field, .. }
            | RecordError::InvalidWidth { field, .. }
            | RecordError::InvalidQuantity { field, .. } => Some(*field),
        }
    }
}

/// Failure of a single report field.
///
/// Seal and blob fields fail either in the core or earlier, when their hex
/// text cannot be decoded; both are reported in place of the field.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error(transparent)]
    Seal(#[from] SealError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl FieldError {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldError::Seal(err) => err.kind(),
            FieldError::Record(err) => err.kind(),
        }
    }

    /// The JSON field whose text could not be decoded, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FieldError::Seal(_) => None,
            FieldError::Record(err) => err.field(),
        }
    }
}
