//! # Polyline Path
//!
//! Straight segments joined end to end, parameterized by arc length.

use glam::DVec3;

use crate::error::MeshError;
use config::constants::EPSILON;

/// Piecewise-linear path through a list of vertices.
///
/// Zero-length segments are dropped on construction so the path never
/// contains a segment without a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePath {
    vertices: Vec<DVec3>,
    /// Cumulative length at each vertex, `cumulative[0] == 0`.
    cumulative: Vec<f64>,
}

impl PolylinePath {
    /// Creates a path through `vertices`.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two distinct vertices remain or a coordinate is
    /// not finite.
    pub fn new(vertices: impl IntoIterator<Item = DVec3>) -> Result<Self, MeshError> {
        let mut kept: Vec<DVec3> = Vec::new();
        for vertex in vertices {
            if !vertex.is_finite() {
                return Err(MeshError::invalid_curve("polyline vertex is not finite"));
            }
            if kept.last().map_or(true, |last| last.distance(vertex) > EPSILON) {
                kept.push(vertex);
            }
        }
        if kept.len() < 2 {
            return Err(MeshError::invalid_curve(format!(
                "polyline needs at least 2 distinct vertices, got {}",
                kept.len()
            )));
        }

        let mut cumulative = Vec::with_capacity(kept.len());
        cumulative.push(0.0);
        for pair in kept.windows(2) {
            let previous = cumulative[cumulative.len() - 1];
            cumulative.push(previous + pair[0].distance(pair[1]));
        }

        Ok(Self {
            vertices: kept,
            cumulative,
        })
    }

    /// Vertices of the path.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Total length.
    pub fn length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Point at arc-length fraction `u`. The ends are returned exactly.
    pub fn point(&self, u: f64) -> DVec3 {
        let last = self.vertices.len() - 1;
        if u <= 0.0 {
            return self.vertices[0];
        }
        if u >= 1.0 {
            return self.vertices[last];
        }

        let target = u * self.length();
        let hi = self
            .cumulative
            .partition_point(|&len| len < target)
            .clamp(1, last);
        let lo = hi - 1;
        let span = self.cumulative[hi] - self.cumulative[lo];
        let fraction = (target - self.cumulative[lo]) / span;
        self.vertices[lo].lerp(self.vertices[hi], fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_duplicate_vertices() {
        let path = PolylinePath::new([DVec3::ZERO, DVec3::ZERO, DVec3::X, DVec3::X]).unwrap();
        assert_eq!(path.segment_count(), 1);
    }

    #[test]
    fn test_rejects_degenerate_path() {
        assert!(PolylinePath::new([DVec3::ZERO, DVec3::ZERO]).is_err());
        assert!(PolylinePath::new([DVec3::ZERO, DVec3::splat(f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_point_is_arc_length_parameterized() {
        // 1 unit along X, then 3 units along Y
        let path = PolylinePath::new([
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 3.0, 0.0),
        ])
        .unwrap();
        assert_eq!(path.length(), 4.0);
        assert!((path.point(0.25) - DVec3::X).length() < 1e-12);
        assert!((path.point(0.5) - DVec3::new(1.0, 1.0, 0.0)).length() < 1e-12);
        assert_eq!(path.point(1.0), DVec3::new(1.0, 3.0, 0.0));
    }
}
