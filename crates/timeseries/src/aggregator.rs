//! Batch driver: decode files, group frames by tile, fill gaps.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use mesh_common::{Frame, TileSeries};
use xband_parser::decode_frame;

use crate::error::{PipelineError, Result};
use crate::interpolate::interpolate;

/// What to do when a file fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the whole batch on the first bad file.
    #[default]
    Abort,
    /// Log a warning, drop the file, and keep going.
    Skip,
}

/// Immutable pipeline configuration, fixed for the duration of a batch.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Synthesize intermediate frames across observation gaps.
    pub completion: bool,
    /// Minimum gap (seconds) before synthesis applies.
    pub min_gap_secs: i64,
    /// Number of sub-intervals a gap is split into.
    pub divisions: i64,
    /// Decode failure handling.
    pub on_error: ErrorPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            completion: false,
            min_gap_secs: 60,
            divisions: 6,
            on_error: ErrorPolicy::Abort,
        }
    }
}

/// One input file, with the timestamp its name encodes (when known) so the
/// pipeline can flag header/filename disagreement.
#[derive(Debug, Clone)]
pub struct BatchFile {
    pub path: PathBuf,
    pub expected_time: Option<i64>,
}

impl BatchFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expected_time: None,
        }
    }

    pub fn with_expected_time(path: impl Into<PathBuf>, expected_time: i64) -> Self {
        Self {
            path: path.into(),
            expected_time: Some(expected_time),
        }
    }
}

/// Open and decode one input file.
pub fn decode_file(path: &Path) -> Result<(String, Frame)> {
    let file = File::open(path).map_err(|source| PipelineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    decode_frame(BufReader::new(file)).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Accumulates decoded frames into per-tile series.
///
/// The aggregator exclusively owns the tile map for a batch run. Frames must
/// be pushed in ascending timestamp order per tile; the caller provides that
/// ordering through the sorted input file list.
pub struct Aggregator {
    config: PipelineConfig,
    series: HashMap<String, Vec<Frame>>,
}

impl Aggregator {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            series: HashMap::new(),
        }
    }

    /// Append a decoded frame to its tile's series, synthesizing gap-filling
    /// frames against the tile's previous frame when completion is enabled.
    pub fn push(&mut self, mesh_id: String, frame: Frame) {
        let series = self.series.entry(mesh_id).or_default();

        if self.config.completion {
            let synthesized = interpolate(
                series,
                &frame,
                self.config.min_gap_secs,
                self.config.divisions,
            );
            series.extend(synthesized);
        }

        series.push(frame);
    }

    /// Finish the batch, returning one series per tile sorted by mesh id.
    pub fn into_tile_series(self) -> Vec<TileSeries> {
        let mut result: Vec<TileSeries> = self
            .series
            .into_iter()
            .map(|(mesh_id, operation)| TileSeries { mesh_id, operation })
            .collect();
        result.sort_by(|a, b| a.mesh_id.cmp(&b.mesh_id));
        result
    }
}

/// Run a batch over a chronologically sorted file list, decoding one file at
/// a time.
pub fn run_batch(files: &[BatchFile], config: &PipelineConfig) -> Result<Vec<TileSeries>> {
    let mut aggregator = Aggregator::new(config.clone());

    for file in files {
        let decoded = decode_file(&file.path);
        merge(&mut aggregator, file, decoded, config.on_error)?;
    }

    finish(aggregator, files.len())
}

/// Run a batch decoding all files in parallel, then merging sequentially in
/// input order. Decoding shares no state across files, so this produces
/// output identical to [`run_batch`].
pub fn run_batch_parallel(files: &[BatchFile], config: &PipelineConfig) -> Result<Vec<TileSeries>> {
    let decoded: Vec<Result<(String, Frame)>> =
        files.par_iter().map(|file| decode_file(&file.path)).collect();

    let mut aggregator = Aggregator::new(config.clone());
    for (file, result) in files.iter().zip(decoded) {
        merge(&mut aggregator, file, result, config.on_error)?;
    }

    finish(aggregator, files.len())
}

fn merge(
    aggregator: &mut Aggregator,
    file: &BatchFile,
    decoded: Result<(String, Frame)>,
    on_error: ErrorPolicy,
) -> Result<()> {
    match decoded {
        Ok((mesh_id, frame)) => {
            if let Some(expected) = file.expected_time {
                if expected != frame.elapsed_time() {
                    warn!(
                        path = %file.path.display(),
                        header_time = frame.elapsed_time(),
                        filename_time = expected,
                        "header timestamp disagrees with filename timestamp"
                    );
                }
            }
            aggregator.push(mesh_id, frame);
            Ok(())
        }
        Err(error) => match on_error {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Skip => {
                warn!(path = %file.path.display(), %error, "skipping undecodable file");
                Ok(())
            }
        },
    }
}

fn finish(aggregator: Aggregator, file_count: usize) -> Result<Vec<TileSeries>> {
    let series = aggregator.into_tile_series();
    info!(
        files = file_count,
        tiles = series.len(),
        frames = series.iter().map(|s| s.operation.len()).sum::<usize>(),
        "batch complete"
    );
    Ok(series)
}
