//! Generators for synthetic X-band radar mesh frames.
//!
//! These build byte-exact frame payloads (64-byte header, 4-byte block
//! headers, 40x40 big-endian cell grids) so decoder tests can assert against
//! predictable input without shipping binary fixtures.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Frame header size in bytes.
pub const FRAME_HEADER_LEN: usize = 64;

/// Bytes in one 40x40 cell grid of big-endian u16 values.
pub const CELL_GRID_LEN: usize = 40 * 40 * 2;

/// Validity flag bit of a raw cell value.
pub const VALID_FLAG: u16 = 0x8000;

/// Build a 64-byte frame header.
///
/// # Arguments
/// * `timestamp_text` - ASCII timestamp, e.g. `"2023.07.01.12.30"` (at most
///   16 bytes; shorter text is zero-padded like the real feed)
/// * `block_count` - Number of block units that follow
/// * `tile_id` - The 2 raw tile identifier bytes
pub fn frame_header(timestamp_text: &str, block_count: u16, tile_id: [u8; 2]) -> Vec<u8> {
    assert!(timestamp_text.len() <= 16, "timestamp field is 16 bytes");

    let mut header = vec![0u8; FRAME_HEADER_LEN];
    // Bytes 0-7: reserved, 8-23: ASCII timestamp, 24-39: system status
    header[8..8 + timestamp_text.len()].copy_from_slice(timestamp_text.as_bytes());
    // Bytes 40-41: reserved, 42-43: block count (big-endian)
    header[42..44].copy_from_slice(&block_count.to_be_bytes());
    // Bytes 44-47: data size (unused by the decoder), 48-49: tile id
    header[48] = tile_id[0];
    header[49] = tile_id[1];
    header
}

/// Build a 4-byte block header. `sub_lat`/`sub_lon` are packed into the
/// nibble pair (high nibble latitude, low nibble longitude).
pub fn block_header(base_lat: u8, base_lon: u8, sub_lat: u8, sub_lon: u8, cell_max: u8) -> [u8; 4] {
    assert!(sub_lat < 16 && sub_lon < 16, "sub offsets are nibbles");
    [base_lat, base_lon, (sub_lat << 4) | sub_lon, cell_max]
}

/// Build one 40x40 cell grid with flagged values at the given positions.
///
/// Each entry is `(row, col, tenths)`: the raw cell becomes
/// `VALID_FLAG | tenths`, i.e. an observed cell with intensity
/// `tenths / 10.0`. All other cells stay zero (flag clear, no observation).
pub fn cell_grid(cells: &[(usize, usize, u16)]) -> Vec<u8> {
    let mut grid = vec![0u8; CELL_GRID_LEN];
    for &(row, col, tenths) in cells {
        assert!(row < 40 && col < 40, "cell position out of range");
        assert!(tenths <= 0x0FFF, "intensity exceeds 12 bits");
        let raw = VALID_FLAG | tenths;
        let offset = (row * 40 + col) * 2;
        grid[offset..offset + 2].copy_from_slice(&raw.to_be_bytes());
    }
    grid
}

/// Gzip-compress a raw payload the way input files are compressed.
pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("in-memory gzip write");
    encoder.finish().expect("in-memory gzip finish")
}

/// Build a complete gzip-compressed frame with one block, one cell grid, and
/// flagged cells at the given `(row, col, tenths)` positions.
pub fn single_block_frame(
    timestamp_text: &str,
    tile_id: [u8; 2],
    base_lat: u8,
    base_lon: u8,
    cells: &[(usize, usize, u16)],
) -> Vec<u8> {
    let mut payload = frame_header(timestamp_text, 1, tile_id);
    payload.extend_from_slice(&block_header(base_lat, base_lon, 0, 0, 1));
    payload.extend_from_slice(&cell_grid(cells));
    gzip(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_header_layout() {
        let header = frame_header("2023.07.01.12.30", 3, [0x53, 0x38]);
        assert_eq!(header.len(), FRAME_HEADER_LEN);
        assert_eq!(&header[8..24], b"2023.07.01.12.30");
        assert_eq!(header[42..44], [0x00, 0x03]);
        assert_eq!(header[48..50], [0x53, 0x38]);
    }

    #[test]
    fn test_block_header_packs_nibbles() {
        let header = block_header(54, 40, 3, 5, 2);
        assert_eq!(header, [54, 40, 0x35, 2]);
    }

    #[test]
    fn test_cell_grid_places_flagged_values() {
        let grid = cell_grid(&[(0, 0, 200), (39, 39, 1)]);
        assert_eq!(grid.len(), CELL_GRID_LEN);
        assert_eq!(u16::from_be_bytes([grid[0], grid[1]]), VALID_FLAG | 200);
        let last = CELL_GRID_LEN - 2;
        assert_eq!(u16::from_be_bytes([grid[last], grid[last + 1]]), VALID_FLAG | 1);
    }
}
