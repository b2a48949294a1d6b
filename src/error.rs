//! Error types for the signature surface and roster

use thiserror::Error;

/// Result type alias for signsheet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while capturing or collecting signatures
///
/// The capture surface itself never hands these to callers; its public
/// input handlers swallow them and degrade to no-ops.
#[derive(Error, Debug)]
pub enum Error {
    /// The raster surface has not been mounted (or has zero area)
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Failed to encode or decode an image
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// Malformed input payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Roster record is missing a field or a signature
    #[error("Incomplete record: {0}")]
    IncompleteRecord(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::EncodeError(err.to_string())
    }
}
