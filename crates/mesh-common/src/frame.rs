//! Decoded frame and tile series types.
//!
//! Field names in the serialized form are fixed by the downstream replay
//! tools (`meshId`, `elapsedtime`, `gridcelldata`, ...) and must not change.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A single observed rainfall cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    /// `[longitude, latitude]` in degrees
    pub position: [f64; 2],
    /// Display color from the rainfall ramp
    pub color: [u8; 3],
    /// Rainfall rate in mm/h
    pub elevation: f64,
}

/// One complete snapshot of a tile at a point in time.
///
/// Slots keep the decoder's scan order (block, group, row, column). A `None`
/// slot marks a grid position whose validity flag was set but whose intensity
/// was not positive; it participates in positional matching during
/// interpolation but is excluded from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    #[serde(rename = "elapsedtime")]
    elapsed_time: i64,
    #[serde(rename = "gridcelldata", serialize_with = "serialize_present")]
    slots: Vec<Option<GridCell>>,
}

impl Frame {
    pub fn new(elapsed_time: i64, slots: Vec<Option<GridCell>>) -> Self {
        Self {
            elapsed_time,
            slots,
        }
    }

    /// Unix timestamp (seconds) of the observation.
    pub fn elapsed_time(&self) -> i64 {
        self.elapsed_time
    }

    /// All slots in scan order, absent positions included.
    pub fn slots(&self) -> &[Option<GridCell>] {
        &self.slots
    }

    /// Number of slots, absent positions included. This is the count that
    /// interpolation shape checks compare.
    pub fn cell_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding an observed cell.
    pub fn present_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

/// Serialize only the present cells, preserving order.
fn serialize_present<S>(slots: &[Option<GridCell>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(None)?;
    for cell in slots.iter().flatten() {
        seq.serialize_element(cell)?;
    }
    seq.end()
}

/// Chronological series of frames for one mesh tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSeries {
    #[serde(rename = "meshId")]
    pub mesh_id: String,
    pub operation: Vec<Frame>,
}
