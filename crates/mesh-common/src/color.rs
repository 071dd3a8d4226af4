//! Rainfall intensity color ramp.
//!
//! Reproduces the standard X-band mosaic visualization palette: a fixed
//! seven-segment piecewise-linear ramp over mm/h intensity bands. The ramp is
//! not perceptually uniform and is not meant to be; downstream tools expect
//! these exact breakpoints and anchor colors.

/// One ramp segment: values above `threshold` blend from `source` toward
/// `target`, with the local rate normalized by `divisor`.
struct Segment {
    threshold: f64,
    source: [u8; 3],
    target: [u8; 3],
    divisor: f64,
}

/// Intensity bands from heaviest to lightest. Lookup walks top-down and
/// takes the first segment whose threshold the value exceeds.
const RAMP: [Segment; 7] = [
    Segment { threshold: 150.0, source: [180, 0, 104], target: [64, 0, 0], divisor: 500.0 },
    Segment { threshold: 100.0, source: [255, 40, 0], target: [180, 0, 104], divisor: 500.0 },
    Segment { threshold: 50.0, source: [255, 153, 0], target: [255, 40, 0], divisor: 500.0 },
    Segment { threshold: 30.0, source: [250, 245, 0], target: [255, 153, 0], divisor: 200.0 },
    Segment { threshold: 20.0, source: [0, 65, 255], target: [250, 245, 0], divisor: 100.0 },
    Segment { threshold: 10.0, source: [33, 140, 255], target: [0, 65, 255], divisor: 100.0 },
    Segment { threshold: 0.0, source: [255, 255, 255], target: [33, 140, 255], divisor: 100.0 },
];

/// Excess above the top threshold is clamped to this ceiling.
const OVERFLOW_CEILING: f64 = 50.0;

/// Map a rainfall rate (mm/h) to its display color.
///
/// Rates at or below zero map to white (visually blank). Rates above 150
/// saturate toward the darkest anchor at +50 and beyond.
pub fn rainfall_color(rainfall: f64) -> [u8; 3] {
    for (i, segment) in RAMP.iter().enumerate() {
        if rainfall > segment.threshold {
            let mut local = rainfall - segment.threshold;
            if i == 0 {
                local = local.min(OVERFLOW_CEILING);
            }
            let rate = local * 10.0 / segment.divisor;
            return blend(segment.source, segment.target, rate);
        }
    }

    [255, 255, 255]
}

/// Channel-wise linear interpolation between two colors.
fn blend(source: [u8; 3], target: [u8; 3], rate: f64) -> [u8; 3] {
    let channel = |s: u8, t: u8| (s as f64 + rate * (t as f64 - s as f64)) as u8;

    [
        channel(source[0], target[0]),
        channel(source[1], target[1]),
        channel(source[2], target[2]),
    ]
}
