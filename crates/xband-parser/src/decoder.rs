//! Frame decoding: gzip decompression plus binary scan.

use std::io::{ErrorKind, Read};

use flate2::read::GzDecoder;
use tracing::debug;

use mesh_common::{cell_position, rainfall_color, Frame, GridCell, BLOCK_EDGE};

use crate::error::{DecodeError, Result};
use crate::header::{BlockHeader, FrameHeader, BLOCK_HEADER_LEN, FRAME_HEADER_LEN};

/// Bytes in one 40x40 grid of big-endian u16 cells.
const CELL_GRID_LEN: usize = BLOCK_EDGE * BLOCK_EDGE * 2;

/// Validity flag: the most significant bit of a raw cell value.
const VALID_FLAG: u16 = 0x8000;

/// Intensity magnitude mask: the low 12 bits, in tenths of a mm/h.
const INTENSITY_MASK: u16 = 0x0FFF;

/// Decode one gzip-compressed frame stream.
///
/// Returns the tile identifier (4 lowercase hex digits) and the decoded
/// frame. Cells are appended in scan order: block, then cell grid, then row,
/// then column. A flagged cell with positive intensity becomes an observed
/// cell; a flagged cell with zero intensity occupies an absent slot; an
/// unflagged cell produces nothing.
///
/// # Errors
/// - [`DecodeError::BadCompression`] if the stream is not valid gzip
/// - [`DecodeError::Truncated`] if the stream ends before `block_count`
///   blocks and their declared cell grids are fully read
pub fn decode_frame<R: Read>(input: R) -> Result<(String, Frame)> {
    let mut stream = GzDecoder::new(input);

    let mut header_buf = [0u8; FRAME_HEADER_LEN];
    read_exact(&mut stream, &mut header_buf, "frame header")?;
    let header = FrameHeader::parse(&header_buf);

    let mesh_id = header.mesh_id();
    let elapsed_time = header.elapsed_time();
    debug!(
        mesh_id = %mesh_id,
        elapsed_time,
        blocks = header.block_count,
        "decoding frame"
    );

    let mut slots: Vec<Option<GridCell>> = Vec::new();
    let mut grid_buf = [0u8; CELL_GRID_LEN];

    for _ in 0..header.block_count {
        let mut block_buf = [0u8; BLOCK_HEADER_LEN];
        read_exact(&mut stream, &mut block_buf, "block header")?;
        let block = BlockHeader::parse(&block_buf);

        for group in 0..block.cell_max as usize {
            read_exact(&mut stream, &mut grid_buf, "cell grid")?;

            for row in 0..BLOCK_EDGE {
                for col in 0..BLOCK_EDGE {
                    let offset = (row * BLOCK_EDGE + col) * 2;
                    let raw = u16::from_be_bytes([grid_buf[offset], grid_buf[offset + 1]]);
                    if raw & VALID_FLAG == 0 {
                        continue;
                    }

                    let rainfall = (raw & INTENSITY_MASK) as f64 / 10.0;
                    if rainfall > 0.0 {
                        let (lon, lat) = cell_position(
                            block.base_lat,
                            block.base_lon,
                            block.sub_lat,
                            block.sub_lon,
                            group,
                            row,
                            col,
                        );
                        slots.push(Some(GridCell {
                            position: [lon, lat],
                            color: rainfall_color(rainfall),
                            elevation: rainfall,
                        }));
                    } else {
                        // Observed but dry: keep the position as an absent
                        // slot so frames stay positionally comparable.
                        slots.push(None);
                    }
                }
            }
        }
    }

    Ok((mesh_id, Frame::new(elapsed_time, slots)))
}

/// Read exactly `buf.len()` bytes, mapping early EOF to `Truncated` and any
/// other stream failure (corrupt gzip header or deflate body) to
/// `BadCompression`.
fn read_exact<R: Read>(stream: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    stream.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => DecodeError::Truncated(what.to_string()),
        _ => DecodeError::BadCompression(e.to_string()),
    })
}
