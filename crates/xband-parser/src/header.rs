//! Fixed-layout header parsing.
//!
//! All multi-byte integers in the format are big-endian.

use chrono::{Local, LocalResult, TimeZone};
use tracing::warn;

/// Frame header size in bytes.
pub const FRAME_HEADER_LEN: usize = 64;

/// Block header size in bytes.
pub const BLOCK_HEADER_LEN: usize = 4;

/// The fixed 64-byte frame header.
///
/// Layout:
/// - Bytes 0-7: reserved
/// - Bytes 8-23: ASCII timestamp (`YYYY.MM.DD.HH.MM`)
/// - Bytes 24-39: system status
/// - Bytes 40-41: reserved
/// - Bytes 42-43: block count (u16)
/// - Bytes 44-47: data size (u32)
/// - Bytes 48-49: tile identifier
/// - Bytes 50-51: secondary data identifier
/// - Bytes 52-63: reserved
#[derive(Debug, Clone)]
pub struct FrameHeader {
    pub timestamp_text: [u8; 16],
    pub block_count: u16,
    pub data_size: u32,
    pub tile_id: [u8; 2],
}

impl FrameHeader {
    /// Parse the header from its raw 64 bytes.
    pub fn parse(raw: &[u8; FRAME_HEADER_LEN]) -> Self {
        let mut timestamp_text = [0u8; 16];
        timestamp_text.copy_from_slice(&raw[8..24]);

        Self {
            timestamp_text,
            block_count: u16::from_be_bytes([raw[42], raw[43]]),
            data_size: u32::from_be_bytes([raw[44], raw[45], raw[46], raw[47]]),
            tile_id: [raw[48], raw[49]],
        }
    }

    /// The tile identifier as 4 lowercase hex digits.
    pub fn mesh_id(&self) -> String {
        format!("{:02x}{:02x}", self.tile_id[0], self.tile_id[1])
    }

    /// Unix timestamp of the embedded observation time, interpreted in the
    /// process-local timezone (the feed records local wall-clock time).
    ///
    /// Parsing is lenient: malformed components read as zero, and a calendar
    /// date that cannot be represented yields timestamp 0 with a warning.
    /// Header corruption never fails the decode.
    pub fn elapsed_time(&self) -> i64 {
        let text = String::from_utf8_lossy(&self.timestamp_text);
        let text = text.trim_end_matches(|c| c == '\0' || c == ' ');

        let mut parts = text.split('.');
        let mut component = || -> u32 {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };
        let (year, month, day) = (component(), component(), component());
        let (hour, minute) = (component(), component());

        match Local.with_ymd_and_hms(year as i32, month, day, hour, minute, 0) {
            LocalResult::Single(dt) => dt.timestamp(),
            LocalResult::Ambiguous(dt, _) => dt.timestamp(),
            LocalResult::None => {
                warn!(timestamp = %text, "unparseable header timestamp, using 0");
                0
            }
        }
    }
}

/// A 4-byte block header: base position indices, the packed sub-mesh offset
/// nibble pair, and the number of 40x40 cell grids that follow.
#[derive(Debug, Clone, Copy)]
pub struct BlockHeader {
    pub base_lat: u8,
    pub base_lon: u8,
    pub sub_lat: u8,
    pub sub_lon: u8,
    pub cell_max: u8,
}

impl BlockHeader {
    /// Parse the header from its raw 4 bytes. The high nibble of byte 2 is
    /// the latitude sub-offset, the low nibble the longitude sub-offset.
    pub fn parse(raw: &[u8; BLOCK_HEADER_LEN]) -> Self {
        Self {
            base_lat: raw[0],
            base_lon: raw[1],
            sub_lat: raw[2] >> 4,
            sub_lon: raw[2] & 0x0F,
            cell_max: raw[3],
        }
    }
}
