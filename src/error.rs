//! Error types for BR-Code encoding and decoding.

use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, PixError>;

/// Errors that can occur while building or reading a BR-Code payload.
#[derive(Error, Debug)]
pub enum PixError {
    /// A request field failed validation
    #[error("Invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },

    /// Sanitized value does not fit a two-digit length prefix
    #[error("Value for field {id} is {len} characters long (max 99)")]
    FieldTooLong { id: String, len: usize },

    /// Field identifier is not two ASCII digits
    #[error("Invalid field identifier {0:?}")]
    InvalidFieldId(String),

    /// Amount is non-finite, non-positive or unparseable
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Payload string is not well-formed TLV
    #[error("Malformed payload at offset {offset}: {message}")]
    MalformedPayload { offset: usize, message: String },

    /// Trailing CRC does not match the payload
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: pix-brcode <requests.csv>")]
    MissingArgument,
}
