//! Input directory scanning and filename parsing.
//!
//! Input files are named `<tileid>-<YYYYMMDD>-<HHMM>-G<nnn>-EL<nnnnnn>.gz`,
//! e.g. `5338-20230701-1200-G000-EL000000.gz`. The embedded timestamp is the
//! observation time and drives window filtering; the frame header carries its
//! own copy, which the pipeline cross-checks downstream.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use tracing::debug;

/// One selected input file, in batch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Observation time from the filename, as a local Unix timestamp.
    pub timestamp: i64,
}

/// List the `.gz` files in `dir` whose filename timestamp falls inside
/// `[start_unix, end_unix]`, sorted by filename.
///
/// Files that do not match the expected naming pattern are skipped with a
/// debug log rather than failing the batch; radar archives routinely hold
/// stray index and lock files.
pub fn scan_directory(dir: &Path, start_unix: i64, end_unix: i64) -> Result<Vec<InputFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_owned(),
            None => continue,
        };

        let timestamp = match filename_timestamp(&name) {
            Some(ts) => ts,
            None => {
                debug!(%name, "ignoring file without a recognized name");
                continue;
            }
        };

        if timestamp < start_unix || timestamp > end_unix {
            debug!(%name, timestamp, "outside the selection window");
            continue;
        }

        files.push(InputFile { path, timestamp });
    }

    // Filenames sort chronologically per tile; ties across tiles keep a
    // stable, reproducible batch order.
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Parse the observation timestamp out of an input filename, or `None` when
/// the name does not follow the archive convention.
fn filename_timestamp(name: &str) -> Option<i64> {
    let stem = name.strip_suffix(".gz")?;
    let mut parts = stem.split('-');

    let _tile = parts.next()?;
    let date = parts.next()?;
    let time = parts.next()?;
    let group = parts.next()?;
    let elevation = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if date.len() != 8 || time.len() != 4 {
        return None;
    }
    if !date.bytes().all(|b| b.is_ascii_digit()) || !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !group.starts_with('G') || !elevation.starts_with("EL") {
        return None;
    }

    let year: i32 = date[..4].parse().ok()?;
    let month: u32 = date[4..6].parse().ok()?;
    let day: u32 = date[6..8].parse().ok()?;
    let hour: u32 = time[..2].parse().ok()?;
    let minute: u32 = time[2..4].parse().ok()?;

    Local
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .map(|dt| dt.timestamp())
}
