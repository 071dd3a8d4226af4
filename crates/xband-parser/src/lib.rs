//! Decoder for the proprietary X-band radar mosaic "mesh" format.
//!
//! Input files are gzip-compressed binary streams: a fixed 64-byte header
//! followed by `block_count` block units, each a 4-byte block header plus one
//! or more 40x40 grids of big-endian 16-bit cells. The decoder turns one
//! stream into a timestamped, geo-referenced, colorized frame.

pub mod error;
pub mod header;

mod decoder;

pub use decoder::decode_frame;
pub use error::{DecodeError, Result};
pub use header::{BlockHeader, FrameHeader, BLOCK_HEADER_LEN, FRAME_HEADER_LEN};
