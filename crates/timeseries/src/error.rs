//! Error types for the time-series pipeline.

use std::path::PathBuf;

use thiserror::Error;
use xband_parser::DecodeError;

/// Errors that can occur while running a batch.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A file could not be opened or read from disk.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file opened fine but its contents failed to decode.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: DecodeError,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
