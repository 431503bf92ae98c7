//! # Cross-Section Profiles
//!
//! The tube's cross-section is a rounded square with a circular bore, split
//! down its vertical diameter into two printable halves. Each half is one
//! closed outline that runs along the split line, around its half of the
//! bore, and back; there is no separate hole contour.
//!
//! ```text
//!        Left              Right
//!    ╭──────┐          ┌──────╮
//!    │      │          │      │
//!    │    ╭─┘          └─╮    │
//!    │    │  bore  bore  │    │
//!    │    ╰─┐          ┌─╯    │
//!    │      │          │      │
//!    ╰──────┘          └──────╯
//!           ^ split line ^
//! ```
//!
//! Both halves share the split-line vertices exactly, so sweeping them along
//! the same curve reconstructs the whole tube with a seam on the parting
//! plane.

#[cfg(test)]
mod tests;

use config::constants::{
    EPSILON, MIN_PROFILE_INNER_SIZE, MIN_PROFILE_OUTER_SIZE, MIN_PROFILE_RADIUS,
    PROFILE_ARC_SEGMENTS,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Which half of the split cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileSide {
    Left,
    Right,
}

impl ProfileSide {
    /// Both sides, left first.
    pub const ALL: [ProfileSide; 2] = [ProfileSide::Left, ProfileSide::Right];

    /// Lowercase name used for labels and export file names.
    pub fn name(self) -> &'static str {
        match self {
            ProfileSide::Left => "left",
            ProfileSide::Right => "right",
        }
    }
}

/// One half of the split "C" cross-section.
///
/// The outline is closed implicitly (last point connects to the first) and
/// wound counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionProfile {
    side: ProfileSide,
    points: Vec<DVec2>,
}

impl CrossSectionProfile {
    /// Builds the requested half with the default arc resolution.
    pub fn new(side: ProfileSide, outer_size: f64, inner_size: f64) -> Self {
        Self::with_segments(side, outer_size, inner_size, PROFILE_ARC_SEGMENTS)
    }

    /// Builds the requested half; `corner_segments` per quarter corner, twice
    /// that for the half bore.
    pub fn with_segments(
        side: ProfileSide,
        outer_size: f64,
        inner_size: f64,
        corner_segments: u32,
    ) -> Self {
        let left = left_outline(outer_size, inner_size, corner_segments.max(1));
        match side {
            ProfileSide::Left => left,
            ProfileSide::Right => left.mirrored(),
        }
    }

    /// Which half this is.
    pub fn side(&self) -> ProfileSide {
        self.side
    }

    /// Outline vertices in order.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Returns the number of outline vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Shoelace area; positive for counter-clockwise outlines.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.perp_dot(b)
            })
            .sum::<f64>()
            / 2.0
    }

    /// Mirror about the split line (`x → −x`), keeping the winding
    /// counter-clockwise.
    pub fn mirrored(&self) -> Self {
        let side = match self.side {
            ProfileSide::Left => ProfileSide::Right,
            ProfileSide::Right => ProfileSide::Left,
        };
        let points = self
            .points
            .iter()
            .rev()
            .map(|p| DVec2::new(-p.x, p.y))
            .collect();
        Self { side, points }
    }
}

/// Left half of the split profile. See [`CrossSectionProfile`].
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::profile::left_profile;
///
/// let profile = left_profile(0.7, 0.5);
/// assert!(profile.points().iter().all(|p| p.x <= 0.0));
/// ```
pub fn left_profile(outer_size: f64, inner_size: f64) -> CrossSectionProfile {
    CrossSectionProfile::new(ProfileSide::Left, outer_size, inner_size)
}

/// Right half of the split profile, the exact mirror of [`left_profile`].
pub fn right_profile(outer_size: f64, inner_size: f64) -> CrossSectionProfile {
    CrossSectionProfile::new(ProfileSide::Right, outer_size, inner_size)
}

/// Traces the left half: bottom edge to the split line, up to the bore,
/// around the left half of the bore, up the split line, along the top edge
/// and down the rounded left side.
fn left_outline(outer_size: f64, inner_size: f64, corner_segments: u32) -> CrossSectionProfile {
    let outer = if outer_size.is_finite() {
        outer_size.max(MIN_PROFILE_OUTER_SIZE)
    } else {
        MIN_PROFILE_OUTER_SIZE
    };
    let inner = if inner_size.is_finite() {
        inner_size.max(MIN_PROFILE_INNER_SIZE)
    } else {
        MIN_PROFILE_INNER_SIZE
    };

    let s = outer / 2.0;
    let r = (outer / 4.0).max(MIN_PROFILE_RADIUS);
    let bore = (inner / 2.0).max(MIN_PROFILE_RADIUS);

    let mut outline = Outline::default();
    outline.push(DVec2::new(-s + r, -s));
    outline.push(DVec2::new(0.0, -s));
    outline.push(DVec2::new(0.0, -bore));
    // Clockwise through (-bore, 0)
    outline.arc(DVec2::ZERO, bore, -FRAC_PI_2, -3.0 * FRAC_PI_2, corner_segments * 2);
    outline.push(DVec2::new(0.0, bore));
    outline.push(DVec2::new(0.0, s));
    outline.push(DVec2::new(-s + r, s));
    outline.arc(DVec2::new(-s + r, s - r), r, FRAC_PI_2, PI, corner_segments);
    outline.push(DVec2::new(-s, s - r));
    outline.push(DVec2::new(-s, -s + r));
    outline.arc(DVec2::new(-s + r, -s + r), r, PI, 1.5 * PI, corner_segments);

    CrossSectionProfile {
        side: ProfileSide::Left,
        points: outline.close(),
    }
}

/// Accumulates outline points, skipping consecutive duplicates.
#[derive(Default)]
struct Outline {
    points: Vec<DVec2>,
}

impl Outline {
    fn push(&mut self, point: DVec2) {
        if self
            .points
            .last()
            .map_or(true, |last| last.distance(point) > EPSILON)
        {
            self.points.push(point);
        }
    }

    /// Interior points of an arc; the caller pushes exact endpoints so split
    /// line vertices keep `x == 0`.
    fn arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, segments: u32) {
        for k in 1..segments {
            let angle = start + (end - start) * k as f64 / segments as f64;
            self.push(center + radius * DVec2::new(angle.cos(), angle.sin()));
        }
    }

    fn close(mut self) -> Vec<DVec2> {
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            if self.points.len() > 1 && first.distance(*last) <= EPSILON {
                self.points.pop();
            }
        }
        self.points
    }
}
