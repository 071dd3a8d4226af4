//! Temporal interpolation between consecutive frames of one tile.
//!
//! Cells are matched positionally: slot `i` of the earlier frame against
//! slot `i` of the later one. That only holds when both frames enumerate the
//! same active positions in the same scan order, which the slot-count
//! precheck guards conservatively; frames with differing slot counts are
//! left uninterpolated rather than matched spatially.

use tracing::debug;

use mesh_common::{rainfall_color, Frame, GridCell};

/// Threshold below which an interpolated cell is dropped instead of emitted.
const MIN_EMIT_RAINFALL: f64 = 0.1;

/// Compute the synthetic frames to insert between the last frame of
/// `existing` and `next`.
///
/// Returns an empty vector when no gap-filling applies: no previous frame,
/// a gap below `min_gap_secs`, mismatched slot counts, or a gap too small to
/// split into `divisions` whole-second steps.
///
/// Otherwise the gap is split into `gap = delta / divisions` second steps
/// (integer division), producing `delta / gap` frames at
/// `last + gap * (i + 1)`. Note the remainder lost by the first division can
/// make the frame count exceed `divisions`, with the final synthetic frame
/// landing at or just before `next`; this matches the established replay
/// output.
pub fn interpolate(existing: &[Frame], next: &Frame, min_gap_secs: i64, divisions: i64) -> Vec<Frame> {
    let last = match existing.last() {
        Some(frame) => frame,
        None => return Vec::new(),
    };

    let delta = next.elapsed_time() - last.elapsed_time();
    if delta < min_gap_secs {
        return Vec::new();
    }

    if last.cell_count() != next.cell_count() {
        debug!(
            before = last.cell_count(),
            after = next.cell_count(),
            "slot counts differ, skipping interpolation"
        );
        return Vec::new();
    }

    if divisions <= 0 {
        return Vec::new();
    }
    let gap = delta / divisions;
    if gap == 0 {
        return Vec::new();
    }
    let count = delta / gap;

    let mut frames = Vec::with_capacity(count as usize);
    for i in 0..count {
        let fraction = (i + 1) as f64 / count as f64;
        let slots = last
            .slots()
            .iter()
            .zip(next.slots())
            .map(|(before, after)| match (before, after) {
                (Some(b), Some(a)) => blend(b.elevation, a.elevation, b.position, fraction),
                (Some(b), None) => blend(b.elevation, 0.0, b.position, fraction),
                (None, Some(a)) => blend(0.0, a.elevation, a.position, fraction),
                (None, None) => None,
            })
            .collect();

        frames.push(Frame::new(last.elapsed_time() + gap * (i + 1), slots));
    }

    frames
}

/// Linearly interpolate rainfall from `from` toward `to`, dropping results
/// below the emission threshold and recoloring the rest.
fn blend(from: f64, to: f64, position: [f64; 2], fraction: f64) -> Option<GridCell> {
    let rainfall = from + (to - from) * fraction;
    if rainfall < MIN_EMIT_RAINFALL {
        return None;
    }

    Some(GridCell {
        position,
        color: rainfall_color(rainfall),
        elevation: rainfall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(rate: f64) -> Option<GridCell> {
        Some(GridCell {
            position: [140.0, 36.0],
            color: rainfall_color(rate),
            elevation: rate,
        })
    }

    fn frame(t: i64, slots: Vec<Option<GridCell>>) -> Frame {
        Frame::new(t, slots)
    }

    #[test]
    fn test_no_previous_frame_means_no_synthesis() {
        let next = frame(120, vec![cell(5.0)]);
        assert!(interpolate(&[], &next, 60, 6).is_empty());
    }

    #[test]
    fn test_gap_below_threshold_means_no_synthesis() {
        let existing = [frame(0, vec![cell(5.0)])];
        let next = frame(59, vec![cell(10.0)]);
        assert!(interpolate(&existing, &next, 60, 6).is_empty());
    }

    #[test]
    fn test_shape_mismatch_means_no_synthesis() {
        let existing = [frame(0, vec![cell(1.0); 5])];
        let next = frame(120, vec![cell(1.0); 6]);
        assert!(interpolate(&existing, &next, 60, 6).is_empty());
    }

    #[test]
    fn test_gap_smaller_than_divisions_means_no_synthesis() {
        // delta / divisions truncates to zero; the original would divide by
        // zero here.
        let existing = [frame(0, vec![cell(1.0)])];
        let next = frame(4, vec![cell(2.0)]);
        assert!(interpolate(&existing, &next, 0, 6).is_empty());
    }

    #[test]
    fn test_decay_toward_absent_cell() {
        // Previous 20.0 mm/h, next absent at the same slot, 120 s gap split
        // six ways: 20 s steps fading by a sixth each.
        let existing = [frame(0, vec![cell(20.0)])];
        let next = frame(120, vec![None]);

        let frames = interpolate(&existing, &next, 60, 6);
        assert_eq!(frames.len(), 6);

        let mut previous = f64::MAX;
        for (i, synth) in frames.iter().enumerate() {
            assert_eq!(synth.elapsed_time(), 20 * (i as i64 + 1));
            if let Some(cell) = &synth.slots()[0] {
                assert!(cell.elevation < previous, "rainfall must decay");
                previous = cell.elevation;
            }
        }

        let first = frames[0].slots()[0].as_ref().unwrap();
        assert!((first.elevation - (20.0 - 20.0 / 6.0)).abs() < 1e-9);

        // The final step reaches 0.0 and is dropped below the threshold.
        assert!(frames[5].slots()[0].is_none());
    }

    #[test]
    fn test_growth_from_absent_cell_uses_after_position() {
        let after = GridCell {
            position: [141.0, 37.0],
            color: rainfall_color(30.0),
            elevation: 30.0,
        };
        let existing = [frame(0, vec![None])];
        let next = frame(120, vec![Some(after)]);

        let frames = interpolate(&existing, &next, 60, 6);
        assert_eq!(frames.len(), 6);

        let first = frames[0].slots()[0].as_ref().unwrap();
        assert!((first.elevation - 5.0).abs() < 1e-9);
        assert_eq!(first.position, [141.0, 37.0]);

        let last = frames[5].slots()[0].as_ref().unwrap();
        assert!((last.elevation - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_both_present_blends_between_values() {
        let existing = [frame(0, vec![cell(10.0)])];
        let next = frame(120, vec![cell(40.0)]);

        let frames = interpolate(&existing, &next, 60, 6);
        assert_eq!(frames.len(), 6);
        let mid = frames[2].slots()[0].as_ref().unwrap();
        assert!((mid.elevation - 25.0).abs() < 1e-9);
        // Color tracks the interpolated intensity.
        assert_eq!(mid.color, rainfall_color(25.0));
    }

    #[test]
    fn test_both_absent_stays_absent() {
        let existing = [frame(0, vec![None, cell(6.0)])];
        let next = frame(120, vec![None, cell(6.0)]);

        let frames = interpolate(&existing, &next, 60, 6);
        assert_eq!(frames.len(), 6);
        for synth in &frames {
            assert!(synth.slots()[0].is_none());
            assert!(synth.slots()[1].is_some());
        }
    }

    #[test]
    fn test_sub_threshold_steps_are_omitted() {
        // 0.36 mm/h fading to nothing: later steps drop below 0.1 and vanish.
        let existing = [frame(0, vec![cell(0.36)])];
        let next = frame(120, vec![None]);

        let frames = interpolate(&existing, &next, 60, 6);
        assert_eq!(frames.len(), 6);
        // Steps: 0.30, 0.24, 0.18, 0.12, 0.06, 0.0
        assert!(frames[3].slots()[0].is_some());
        assert!(frames[4].slots()[0].is_none());
        assert!(frames[5].slots()[0].is_none());
    }

    #[test]
    fn test_remainder_gap_can_exceed_divisions() {
        // delta 130 over 6 divisions: gap 21, count 6 -> last frame at 126.
        let existing = [frame(0, vec![cell(12.0)])];
        let next = frame(130, vec![cell(12.0)]);

        let frames = interpolate(&existing, &next, 60, 6);
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[5].elapsed_time(), 126);
    }
}
