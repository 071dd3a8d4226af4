//! Error types for the xband-parser crate.

use thiserror::Error;

/// Errors that can occur while decoding a frame.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not a valid gzip stream.
    #[error("input is not valid gzip data: {0}")]
    BadCompression(String),

    /// The stream ended before the declared structure was fully read.
    #[error("truncated stream while reading {0}")]
    Truncated(String),
}

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
