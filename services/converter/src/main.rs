//! X-band radar mesh converter.
//!
//! Reads gzip-compressed radar mosaic files from a directory, decodes them
//! into per-tile frame series (optionally synthesizing intermediate frames
//! across observation gaps), and writes the result as one JSON document.

mod config;
mod files;

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::ConverterConfig;
use files::scan_directory;
use timeseries::{run_batch, run_batch_parallel, BatchFile};

#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(about = "X-band radar mesh to JSON time-series converter")]
struct Args {
    /// Input directory holding the .gz mosaic files
    #[arg(short, long, default_value = "xbanddata")]
    dir: std::path::PathBuf,

    /// First day of the selection window (MM-DD, current year)
    #[arg(long, default_value = "01-01")]
    start_date: String,

    /// Last day of the selection window (MM-DD, current year)
    #[arg(long, default_value = "12-31")]
    end_date: String,

    /// Time of day the window opens (HH:MM)
    #[arg(long, default_value = "00:00")]
    start_time: String,

    /// Time of day the window closes (HH:MM, 24:00 covers the whole day)
    #[arg(long, default_value = "24:00")]
    end_time: String,

    /// Synthesize intermediate frames across observation gaps
    #[arg(long)]
    completion: bool,

    /// Minimum gap in seconds before synthesis applies
    #[arg(long, default_value_t = 60)]
    min_gap_time: i64,

    /// Number of sub-intervals a gap is split into
    #[arg(long, default_value_t = 6)]
    divisions: i64,

    /// Skip files that fail to decode instead of aborting
    #[arg(long)]
    skip_errors: bool,

    /// Decode files in parallel
    #[arg(long)]
    parallel: bool,

    /// Output path (default: <dir>/output.json)
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ConverterConfig::new(
        args.dir,
        &args.start_date,
        &args.start_time,
        &args.end_date,
        &args.end_time,
        args.completion,
        args.min_gap_time,
        args.divisions,
        args.skip_errors,
        args.parallel,
        args.output,
    )?;

    info!(
        dir = %config.dir.display(),
        start = config.start_unix,
        end = config.end_unix,
        completion = config.pipeline.completion,
        "Starting radar mesh conversion"
    );

    let inputs = scan_directory(&config.dir, config.start_unix, config.end_unix)?;
    info!(files = inputs.len(), "Selected input files");

    let batch: Vec<BatchFile> = inputs
        .into_iter()
        .map(|input| BatchFile::with_expected_time(input.path, input.timestamp))
        .collect();

    let series = if config.parallel {
        run_batch_parallel(&batch, &config.pipeline)?
    } else {
        run_batch(&batch, &config.pipeline)?
    };

    let file = File::create(&config.output)
        .with_context(|| format!("creating {}", config.output.display()))?;
    serde_json::to_writer(BufWriter::new(file), &series)
        .with_context(|| format!("writing {}", config.output.display()))?;

    info!(
        output = %config.output.display(),
        tiles = series.len(),
        "Conversion complete"
    );
    Ok(())
}
