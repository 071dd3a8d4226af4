//! Converter configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, Local, TimeZone};

use timeseries::{ErrorPolicy, PipelineConfig};

/// Immutable runtime configuration assembled from the command line.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Directory holding the input `.gz` files.
    pub dir: PathBuf,
    /// Inclusive selection window as Unix timestamps.
    pub start_unix: i64,
    pub end_unix: i64,
    /// Pipeline behavior (completion, gap threshold, error policy).
    pub pipeline: PipelineConfig,
    /// Decode files in parallel before the sequential merge.
    pub parallel: bool,
    /// Where the JSON document is written.
    pub output: PathBuf,
}

impl ConverterConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dir: PathBuf,
        start_date: &str,
        start_time: &str,
        end_date: &str,
        end_time: &str,
        completion: bool,
        min_gap_secs: i64,
        divisions: i64,
        skip_errors: bool,
        parallel: bool,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let start_unix = window_boundary(start_date, start_time)
            .context("invalid start date/time")?;
        let end_unix = window_boundary(end_date, end_time).context("invalid end date/time")?;

        let output = output.unwrap_or_else(|| dir.join("output.json"));

        Ok(Self {
            dir,
            start_unix,
            end_unix,
            pipeline: PipelineConfig {
                completion,
                min_gap_secs,
                divisions,
                on_error: if skip_errors {
                    ErrorPolicy::Skip
                } else {
                    ErrorPolicy::Abort
                },
            },
            parallel,
            output,
        })
    }
}

/// Resolve a `MM-DD` date and `HH:MM` time in the current year to a local
/// Unix timestamp. `24:00` is accepted and rolls into the next day, so the
/// default end window covers the whole final day.
fn window_boundary(date: &str, time: &str) -> Result<i64> {
    let (month, day) = split_pair(date, '-').context("date must be MM-DD")?;
    let (hour, minute) = split_pair(time, ':').context("time must be HH:MM")?;
    if hour > 24 || minute > 59 {
        bail!("time out of range: {time}");
    }

    let year = Local::now().year();
    let midnight = Local
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .with_context(|| format!("invalid date: {date}"))?;

    Ok((midnight + Duration::minutes(hour as i64 * 60 + minute as i64)).timestamp())
}

fn split_pair(text: &str, separator: char) -> Result<(u32, u32)> {
    let (first, second) = text
        .split_once(separator)
        .with_context(|| format!("expected two fields in '{text}'"))?;
    Ok((first.trim().parse()?, second.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_boundary_start_of_day() {
        let year = Local::now().year();
        let expected = Local
            .with_ymd_and_hms(year, 7, 1, 0, 0, 0)
            .single()
            .unwrap()
            .timestamp();
        assert_eq!(window_boundary("07-01", "00:00").unwrap(), expected);
    }

    #[test]
    fn test_window_boundary_end_of_day_rolls_over() {
        let year = Local::now().year();
        let next_day = Local
            .with_ymd_and_hms(year, 7, 2, 0, 0, 0)
            .single()
            .unwrap()
            .timestamp();
        assert_eq!(window_boundary("07-01", "24:00").unwrap(), next_day);
    }

    #[test]
    fn test_window_boundary_rejects_garbage() {
        assert!(window_boundary("July 1st", "00:00").is_err());
        assert!(window_boundary("07-01", "25:00").is_err());
        assert!(window_boundary("13-40", "00:00").is_err());
    }

    #[test]
    fn test_default_output_path() {
        let config = ConverterConfig::new(
            PathBuf::from("/data/xband"),
            "01-01",
            "00:00",
            "12-31",
            "24:00",
            false,
            60,
            6,
            false,
            false,
            None,
        )
        .unwrap();
        assert_eq!(config.output, PathBuf::from("/data/xband/output.json"));
        assert!(config.start_unix < config.end_unix);
    }
}
