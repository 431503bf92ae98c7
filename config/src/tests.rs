//! # Tests for Config Constants
//!
//! Sanity checks on the relationships between constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON > 0.0 && EPSILON < 1e-6);
}

#[test]
fn test_vertex_merge_epsilon_larger_than_epsilon() {
    assert!(VERTEX_MERGE_EPSILON >= EPSILON);
}

// =============================================================================
// PARAMETER TESTS
// =============================================================================

#[test]
fn test_default_face_clears_wall_ratio() {
    let face = DEFAULT_HOLE_DIAMETER * FACE_TO_HOLE_RATIO;
    assert!(face > DEFAULT_HOLE_DIAMETER * MIN_FACE_TO_HOLE_RATIO);
}

#[test]
fn test_default_slider_maps_to_default_length() {
    assert_eq!(SLIDER_LENGTH_NUMERATOR / DEFAULT_SLIDER_VALUE, DEFAULT_TOTAL_LENGTH);
}

// =============================================================================
// LAYOUT TESTS
// =============================================================================

#[test]
fn test_surface_gaps_stay_distinct() {
    // The framing estimate and the geometry disagree; keep it visible.
    assert_eq!(DESIRED_SURFACE_GAP, 1.0);
    assert_eq!(CAMERA_FRAMING_SURFACE_GAP, 4.0);
}

#[test]
fn test_profile_minimums_are_ordered() {
    assert!(MIN_PROFILE_RADIUS < MIN_PROFILE_INNER_SIZE);
    assert!(MIN_PROFILE_INNER_SIZE < MIN_PROFILE_OUTER_SIZE);
}
