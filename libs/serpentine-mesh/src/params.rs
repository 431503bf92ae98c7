//! # Parameters and Layout
//!
//! Turns raw control values into [`GeometryParameters`] and derives the
//! dependent [`DerivedLayout`] (bend radius, lobe spacing, straight runs).
//!
//! Sanitizing never fails: unusable values are replaced with defaults.
//! Deriving the layout fails only when the requested length cannot hold the
//! reserved bends, which callers treat as "publish nothing".

use config::constants::{
    DEFAULT_HOLE_DIAMETER, DEFAULT_SLIDER_VALUE, DEFAULT_TOTAL_LENGTH, FACE_TO_HOLE_RATIO,
    MIN_FACE_TO_HOLE_RATIO, RESERVED_BENDS, SLIDER_LENGTH_NUMERATOR, STRAIGHT_RUNS,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::MeshError;

/// Sanitized user parameters.
///
/// Invariant: every field is finite and positive and
/// `face_size > hole_diameter * 1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParameters {
    /// Total centerline length budget.
    pub total_length: f64,
    /// Bore diameter.
    pub hole_diameter: f64,
    /// Outer face size of the cross-section.
    pub face_size: f64,
}

impl Default for GeometryParameters {
    fn default() -> Self {
        sanitize(f64::NAN, f64::NAN, f64::NAN)
    }
}

impl GeometryParameters {
    /// Sanitizes raw input. See [`sanitize`].
    pub fn sanitize(raw_length: f64, raw_face: f64, raw_hole: f64) -> Self {
        sanitize(raw_length, raw_face, raw_hole)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Replaces non-finite or non-positive input with defaults and enforces a
/// minimum wall around the bore.
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::params::sanitize;
///
/// let params = sanitize(f64::NAN, -1.0, 0.5);
/// assert_eq!(params.total_length, 85.75);
/// assert!((params.face_size - 0.7).abs() < 1e-12);
/// ```
pub fn sanitize(raw_length: f64, raw_face: f64, raw_hole: f64) -> GeometryParameters {
    let total_length = positive_or(raw_length, DEFAULT_TOTAL_LENGTH);
    let hole_diameter = positive_or(raw_hole, DEFAULT_HOLE_DIAMETER);
    let mut face_size = positive_or(raw_face, hole_diameter * FACE_TO_HOLE_RATIO);

    if face_size <= hole_diameter * MIN_FACE_TO_HOLE_RATIO {
        face_size = hole_diameter * FACE_TO_HOLE_RATIO;
    }

    if total_length != raw_length || hole_diameter != raw_hole || face_size != raw_face {
        tracing::debug!(
            raw_length,
            raw_face,
            raw_hole,
            total_length,
            face_size,
            hole_diameter,
            "substituted parameter defaults"
        );
    }

    GeometryParameters {
        total_length,
        hole_diameter,
        face_size,
    }
}

/// Maps the length slider position to a total length (`8575 / slider`).
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::params::length_from_slider;
///
/// assert_eq!(length_from_slider(100.0), 85.75);
/// assert_eq!(length_from_slider(f64::NAN), 85.75);
/// ```
pub fn length_from_slider(slider_value: f64) -> f64 {
    SLIDER_LENGTH_NUMERATOR / positive_or(slider_value, DEFAULT_SLIDER_VALUE)
}

/// Face size driven by the hole slider.
pub fn face_for_hole(hole_diameter: f64) -> f64 {
    hole_diameter * FACE_TO_HOLE_RATIO
}

/// Layout quantities derived from [`GeometryParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedLayout {
    /// Centerline radius of every 180° bend.
    pub bend_radius: f64,
    /// Vertical distance between the two S-curves.
    pub vertical_gap: f64,
    /// Length of each of the four straight runs.
    pub line_segment_length: f64,
    /// Overall height of the tube assembly.
    pub object_height: f64,
    /// Overall width of the tube assembly.
    pub object_width: f64,
}

impl DerivedLayout {
    /// Vertical offset of the top S-curve.
    pub fn top_offset(&self) -> f64 {
        self.vertical_gap / 2.0
    }

    /// Vertical offset of the bottom S-curve.
    pub fn bottom_offset(&self) -> f64 {
        -self.vertical_gap / 2.0
    }

    /// Arc length reserved for the three bends.
    pub fn reserved_arc_length(&self) -> f64 {
        reserved_arc_length(self.bend_radius)
    }
}

fn reserved_arc_length(bend_radius: f64) -> f64 {
    RESERVED_BENDS * PI * bend_radius
}

/// Derives the layout for `params`.
///
/// A negative or non-finite `desired_surface_gap` is treated as zero so the
/// bend radius and lobe spacing are never negative.
///
/// # Errors
///
/// [`MeshError::DegenerateLayout`] when the straight runs would have
/// non-positive length.
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::params::{derive_layout, sanitize};
///
/// let layout = derive_layout(&sanitize(85.75, 0.7, 0.5), 1.0).unwrap();
/// assert!((layout.bend_radius - 0.85).abs() < 1e-12);
/// assert!((layout.vertical_gap - 3.4).abs() < 1e-12);
///
/// assert!(derive_layout(&sanitize(5.0, 0.7, 0.5), 1.0).is_err());
/// ```
pub fn derive_layout(
    params: &GeometryParameters,
    desired_surface_gap: f64,
) -> Result<DerivedLayout, MeshError> {
    let gap = if desired_surface_gap.is_finite() {
        desired_surface_gap.max(0.0)
    } else {
        0.0
    };
    let face = params.face_size;

    let bend_radius = (gap + face) / 2.0;
    let vertical_gap = 2.0 * bend_radius + gap + face;
    let reserved = reserved_arc_length(bend_radius);
    let line_segment_length = (params.total_length - reserved) / STRAIGHT_RUNS;

    if !(line_segment_length > 0.0) {
        return Err(MeshError::DegenerateLayout {
            total_length: params.total_length,
            reserved_arc_length: reserved,
            line_segment_length,
        });
    }

    Ok(DerivedLayout {
        bend_radius,
        vertical_gap,
        line_segment_length,
        object_height: vertical_gap + 2.0 * bend_radius + face,
        object_width: line_segment_length + 2.0 * bend_radius + face,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sanitize_replaces_garbage() {
        let params = sanitize(f64::INFINITY, f64::NAN, 0.0);
        assert_eq!(params.total_length, DEFAULT_TOTAL_LENGTH);
        assert_eq!(params.hole_diameter, DEFAULT_HOLE_DIAMETER);
        assert_relative_eq!(params.face_size, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_sanitize_resets_thin_wall() {
        // 0.54 <= 0.5 * 1.1 leaves no wall
        let params = sanitize(50.0, 0.54, 0.5);
        assert_relative_eq!(params.face_size, 0.7, epsilon = 1e-12);

        let params = sanitize(50.0, 0.56, 0.5);
        assert_eq!(params.face_size, 0.56);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            (85.75, 0.7, 0.5),
            (10.0, 3.0, 2.0),
            (f64::NAN, f64::NAN, f64::NAN),
            (-3.0, 0.1, 4.0),
            (1e6, 1e3, 1.0),
        ];
        for (l, f, h) in samples {
            let once = sanitize(l, f, h);
            let twice = sanitize(once.total_length, once.face_size, once.hole_diameter);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_default_scenario_layout() {
        let params = sanitize(85.75, f64::NAN, 0.5);
        let layout = derive_layout(&params, 1.0).unwrap();
        assert_relative_eq!(layout.bend_radius, 0.85, epsilon = 1e-12);
        assert_relative_eq!(layout.vertical_gap, 3.4, epsilon = 1e-12);
        assert_relative_eq!(layout.reserved_arc_length(), 8.011_061_266, epsilon = 1e-6);
        assert_relative_eq!(layout.line_segment_length, 19.434_734_68, epsilon = 1e-6);
        assert_relative_eq!(layout.object_height, 3.4 + 1.7 + 0.7, epsilon = 1e-12);
        assert_relative_eq!(layout.top_offset(), 1.7, epsilon = 1e-12);
        assert_relative_eq!(layout.bottom_offset(), -1.7, epsilon = 1e-12);
    }

    #[test]
    fn test_short_length_is_degenerate() {
        let params = sanitize(8.0, 0.7, 0.5);
        let err = derive_layout(&params, 1.0).unwrap_err();
        assert!(err.is_degenerate_layout());
    }

    #[test]
    fn test_layout_never_negative() {
        let params = sanitize(1e9, 0.7, 0.5);
        for gap in [-5.0, 0.0, 1.0, 4.0, f64::NAN, f64::NEG_INFINITY] {
            let layout = derive_layout(&params, gap).unwrap();
            assert!(layout.bend_radius >= 0.0);
            assert!(layout.vertical_gap >= 0.0);
        }
    }

    #[test]
    fn test_slider_mapping() {
        assert_relative_eq!(length_from_slider(50.0), 171.5);
        assert_eq!(length_from_slider(-2.0), DEFAULT_TOTAL_LENGTH);
        assert_relative_eq!(face_for_hole(1.0), 1.4);
    }
}
