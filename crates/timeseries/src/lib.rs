//! Per-tile time-series assembly for decoded radar mesh frames.
//!
//! The aggregator drives a batch of input files through the decoder, groups
//! frames by tile, and optionally synthesizes intermediate frames so playback
//! tools see evenly spaced steps across observation gaps.

pub mod aggregator;
pub mod error;
pub mod interpolate;

pub use aggregator::{
    decode_file, run_batch, run_batch_parallel, Aggregator, BatchFile, ErrorPolicy, PipelineConfig,
};
pub use error::{PipelineError, Result};
pub use interpolate::interpolate;
