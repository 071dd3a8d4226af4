//! Common types shared across the xband-replay workspace.

pub mod color;
pub mod frame;
pub mod geodetic;

pub use color::rainfall_color;
pub use frame::{Frame, GridCell, TileSeries};
pub use geodetic::{cell_position, BLOCK_EDGE, UNIT_LAT, UNIT_LON};
