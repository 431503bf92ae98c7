//! # Serpentine Centerlines
//!
//! The tube follows three curves: a top S-curve, a bottom S-curve and a
//! semicircular connector on the left that joins the end of the top curve to
//! the start of the bottom one.

use glam::DVec3;
use std::f64::consts::PI;

use super::{CatmullRom, Curve, PolylinePath};
use crate::error::MeshError;
use crate::params::DerivedLayout;

/// Builds one S-curve: a top run heading +X, a 180° bend down on the right,
/// and a bottom run heading back −X, `2 * bend_radius` lower.
///
/// `arc_segments` is the number of angular steps across the half-turn; the
/// bend contributes its interior samples only, the run endpoints close it.
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::curve::serpentine_curve;
///
/// let curve = serpentine_curve(10.0, 1.0, 0.5, 32).unwrap();
/// assert!((curve.start().x + 5.0).abs() < 1e-12);
/// assert!((curve.end().y - 0.0).abs() < 1e-12);
/// ```
pub fn serpentine_curve(
    segment_length: f64,
    vertical_offset: f64,
    bend_radius: f64,
    arc_segments: u32,
) -> Result<Curve, MeshError> {
    let half = segment_length / 2.0;
    let lower = vertical_offset - 2.0 * bend_radius;
    let steps = arc_segments.max(2);

    let mut points = Vec::with_capacity(steps as usize + 3);
    points.push(DVec3::new(-half, vertical_offset, 0.0));
    points.push(DVec3::new(half, vertical_offset, 0.0));

    for k in 1..steps {
        let t = PI * k as f64 / steps as f64;
        points.push(DVec3::new(
            half + bend_radius * t.sin(),
            vertical_offset - bend_radius * (1.0 - t.cos()),
            0.0,
        ));
    }

    points.push(DVec3::new(half, lower, 0.0));
    points.push(DVec3::new(-half, lower, 0.0));

    CatmullRom::new(points).map(Curve::from)
}

/// Builds the connector from the top curve's end `(−L/2, top − 2r)` to the
/// bottom curve's start `(−L/2, bottom)`.
///
/// The path leads in horizontally, follows a counter-clockwise half circle
/// (angles π/2 → 3π/2) whose diameter is the vertical distance between the
/// two ends, and leads out horizontally. Its endpoints are the exact
/// coordinates the S-curves start and end on.
pub fn connecting_curve(
    segment_length: f64,
    top_offset: f64,
    bottom_offset: f64,
    bend_radius: f64,
    arc_segments: u32,
) -> Result<Curve, MeshError> {
    let x = -segment_length / 2.0;
    let y0 = top_offset - 2.0 * bend_radius;
    let y1 = bottom_offset;
    let radius = (y0 - y1).abs() / 2.0;
    let center_x = x - radius;
    let center_y = (y0 + y1) / 2.0;
    let steps = arc_segments.max(2);

    let arc = (0..=steps).map(|k| {
        let angle = PI / 2.0 + PI * k as f64 / steps as f64;
        DVec3::new(
            center_x + radius * angle.cos(),
            center_y + radius * angle.sin(),
            0.0,
        )
    });

    let vertices = std::iter::once(DVec3::new(x, y0, 0.0))
        .chain(arc)
        .chain(std::iter::once(DVec3::new(x, y1, 0.0)));

    PolylinePath::new(vertices).map(Curve::from)
}

/// The three centerlines of one rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterlineSet {
    pub top: Curve,
    pub bottom: Curve,
    pub connector: Curve,
}

impl CenterlineSet {
    /// Builds all three curves from a derived layout.
    pub fn from_layout(layout: &DerivedLayout, arc_segments: u32) -> Result<Self, MeshError> {
        let length = layout.line_segment_length;
        let radius = layout.bend_radius;
        let top_offset = layout.top_offset();
        let bottom_offset = layout.bottom_offset();

        Ok(Self {
            top: serpentine_curve(length, top_offset, radius, arc_segments)?,
            bottom: serpentine_curve(length, bottom_offset, radius, arc_segments)?,
            connector: connecting_curve(length, top_offset, bottom_offset, radius, arc_segments)?,
        })
    }
}
