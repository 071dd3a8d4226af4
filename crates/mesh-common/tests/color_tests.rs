//! Tests for the rainfall color ramp.

use mesh_common::rainfall_color;

// ============================================================================
// Anchor colors
// ============================================================================

#[test]
fn test_anchor_colors() {
    // Band tops land exactly on the documented anchor colors.
    assert_eq!(rainfall_color(150.0), [180, 0, 104]);
    assert_eq!(rainfall_color(100.0), [255, 40, 0]);
    assert_eq!(rainfall_color(50.0), [255, 153, 0]);
    assert_eq!(rainfall_color(30.0), [250, 245, 0]);
    assert_eq!(rainfall_color(20.0), [0, 65, 255]);
    assert_eq!(rainfall_color(10.0), [33, 140, 255]);
}

#[test]
fn test_zero_and_negative_are_white() {
    assert_eq!(rainfall_color(0.0), [255, 255, 255]);
    assert_eq!(rainfall_color(-0.1), [255, 255, 255]);
    assert_eq!(rainfall_color(-100.0), [255, 255, 255]);
}

// ============================================================================
// Segment interiors
// ============================================================================

#[test]
fn test_light_rain_blends_toward_light_blue() {
    // Halfway through the 0-10 band: white -> (33, 140, 255).
    assert_eq!(rainfall_color(5.0), [144, 197, 255]);
}

#[test]
fn test_mid_band_interiors() {
    assert_eq!(rainfall_color(15.0), [16, 102, 255]);
    assert_eq!(rainfall_color(25.0), [125, 155, 127]);
    assert_eq!(rainfall_color(40.0), [252, 199, 0]);
    assert_eq!(rainfall_color(75.0), [255, 96, 0]);
    assert_eq!(rainfall_color(125.0), [217, 20, 52]);
    assert_eq!(rainfall_color(175.0), [122, 0, 52]);
}

// ============================================================================
// Overflow clamp
// ============================================================================

#[test]
fn test_overflow_clamps_at_plus_fifty() {
    // 200 mm/h reaches the darkest anchor; anything heavier stays there.
    assert_eq!(rainfall_color(200.0), [64, 0, 0]);
    assert_eq!(rainfall_color(500.0), [64, 0, 0]);
    assert_eq!(rainfall_color(9999.0), [64, 0, 0]);
}
