//! Geodetic position mapping for radar mesh cells.
//!
//! The mesh follows the standard four-level subdivision: a primary tile is
//! split into eighths in both axes, then each eighth into quarter third-level
//! meshes of 40x40 cells. Block headers carry small integer indices; the
//! constants below convert them to degrees.

/// Angular height of one cell: 960 cells per 2 degrees of latitude.
pub const UNIT_LAT: f64 = 2.0 / (3.0 * 8.0 * 40.0);

/// Angular width of one cell: 320 cells per degree of longitude.
pub const UNIT_LON: f64 = 1.0 / (8.0 * 40.0);

/// Cells along one edge of a block's cell grid.
pub const BLOCK_EDGE: usize = 40;

/// Degrees of latitude per base index unit (index is in 2/3-degree steps).
const LAT_INDEX_SCALE: f64 = 1.5;

/// Regional meridian anchor: base longitude indices count up from 100 E.
const LON_INDEX_BIAS: f64 = 100.0;

/// Compute the geodetic position of a single cell.
///
/// Rows count southward from the block's northern edge, columns eastward from
/// its western edge. `group` is the index of the 40x40 cell grid within the
/// block; successive groups extend the block eastward, so the group index
/// folds into the longitude sub-offset.
///
/// # Arguments
/// * `base_lat` - Base latitude index from the block header
/// * `base_lon` - Base longitude index from the block header
/// * `sub_lat` - Latitude sub-mesh offset (high nibble, 0-15)
/// * `sub_lon` - Longitude sub-mesh offset (low nibble, 0-15)
/// * `group` - Index of the cell grid within the block
/// * `row` - Cell row within the grid (0-39, north to south)
/// * `col` - Cell column within the grid (0-39, west to east)
///
/// # Returns
/// `(longitude, latitude)` in degrees
pub fn cell_position(
    base_lat: u8,
    base_lon: u8,
    sub_lat: u8,
    sub_lon: u8,
    group: usize,
    row: usize,
    col: usize,
) -> (f64, f64) {
    let lat = base_lat as f64 / LAT_INDEX_SCALE
        + ((sub_lat as f64 + 1.0) * BLOCK_EDGE as f64 - row as f64) * UNIT_LAT;
    let lon = base_lon as f64
        + LON_INDEX_BIAS
        + ((sub_lon as f64 + group as f64) * BLOCK_EDGE as f64 + col as f64) * UNIT_LON;

    (lon, lat)
}
