//! # Catmull-Rom Spline
//!
//! Open centripetal Catmull-Rom spline through a list of control points.
//!
//! The centripetal parameterization weights each span by the square root of
//! its chord length, so a long straight run next to densely sampled bend
//! points does not overshoot. The curve passes through every control point
//! with a continuous tangent.

use glam::DVec3;

use super::{ArcLengthTable, ARC_LENGTH_DIVISIONS};
use crate::error::MeshError;

/// Spans shorter than this fall back to a unit knot interval.
const MIN_KNOT_INTERVAL: f64 = 1e-4;

/// Arc-length samples per span. Speed varies strongly across a long span
/// that meets a short one, so the table is refined per span.
const ARC_LENGTH_SAMPLES_PER_SPAN: usize = 64;

/// Open centripetal Catmull-Rom spline.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom {
    points: Vec<DVec3>,
    arc_lengths: ArcLengthTable,
}

impl CatmullRom {
    /// Creates a spline through `points`.
    ///
    /// # Errors
    ///
    /// Fails with fewer than two control points or a non-finite coordinate.
    pub fn new(points: Vec<DVec3>) -> Result<Self, MeshError> {
        if points.len() < 2 {
            return Err(MeshError::invalid_curve(format!(
                "spline needs at least 2 control points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(MeshError::invalid_curve("spline control point is not finite"));
        }

        let divisions = ARC_LENGTH_DIVISIONS.max((points.len() - 1) * ARC_LENGTH_SAMPLES_PER_SPAN);
        let arc_lengths = ArcLengthTable::tabulate(divisions, |t| evaluate(&points, t));
        Ok(Self {
            points,
            arc_lengths,
        })
    }

    /// Control points the spline interpolates.
    pub fn control_points(&self) -> &[DVec3] {
        &self.points
    }

    /// Evaluates the spline at raw parameter `t`.
    pub fn point(&self, t: f64) -> DVec3 {
        evaluate(&self.points, t)
    }

    pub(crate) fn arc_lengths(&self) -> &ArcLengthTable {
        &self.arc_lengths
    }
}

fn evaluate(points: &[DVec3], t: f64) -> DVec3 {
    let last = points.len() - 1;
    if t <= 0.0 {
        return points[0];
    }
    if t >= 1.0 {
        return points[last];
    }

    let scaled = last as f64 * t;
    let span = (scaled.floor() as usize).min(last - 1);
    let weight = scaled - span as f64;

    let p1 = points[span];
    let p2 = points[span + 1];
    // Reflect the neighbours past the ends
    let p0 = if span > 0 {
        points[span - 1]
    } else {
        2.0 * p1 - p2
    };
    let p3 = if span + 2 <= last {
        points[span + 2]
    } else {
        2.0 * p2 - p1
    };

    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);

    if dt1 < MIN_KNOT_INTERVAL {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_INTERVAL {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_INTERVAL {
        dt2 = dt1;
    }

    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    hermite(p1, p2, m1, m2, weight)
}

/// Cubic Hermite segment from `p1` to `p2` with end tangents `m1`, `m2`.
fn hermite(p1: DVec3, p2: DVec3, m1: DVec3, m2: DVec3, w: f64) -> DVec3 {
    let c0 = p1;
    let c1 = m1;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;
    c0 + w * (c1 + w * (c2 + w * c3))
}
