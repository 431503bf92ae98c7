//! # Curves
//!
//! Continuous 3D centerlines the cross-section is swept along.
//!
//! - `catmull_rom`: smooth spline through control points (S-curves)
//! - `polyline`: piecewise-linear path (connector)
//! - `serpentine`: builders for the three centerlines of one rebuild
//!
//! Every curve is evaluated in two ways: [`Curve::point`] takes the raw
//! spline parameter, [`Curve::point_at`] takes a normalized arc-length
//! fraction. Sweeping uses the arc-length form so rings are evenly spaced.

mod catmull_rom;
mod polyline;
mod serpentine;


pub use catmull_rom::CatmullRom;
pub use polyline::PolylinePath;
pub use serpentine::{connecting_curve, serpentine_curve, CenterlineSet};

use glam::DVec3;

/// Divisions used to tabulate arc length for curves without a closed form.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Parameter step for finite-difference tangents.
const TANGENT_DELTA: f64 = 1e-4;

/// An immutable parametric centerline `p(t), t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    /// Smooth interpolating spline.
    Spline(CatmullRom),
    /// Straight segments joined end to end.
    Polyline(PolylinePath),
}

impl Curve {
    /// Evaluates the curve at raw parameter `t` (clamped to `[0, 1]`).
    pub fn point(&self, t: f64) -> DVec3 {
        match self {
            Curve::Spline(spline) => spline.point(t),
            Curve::Polyline(path) => path.point(t),
        }
    }

    /// Evaluates the curve at arc-length fraction `u` (clamped to `[0, 1]`).
    pub fn point_at(&self, u: f64) -> DVec3 {
        match self {
            Curve::Spline(spline) => spline.point(spline.arc_lengths().u_to_t(u)),
            // Polyline parameter already is arc length
            Curve::Polyline(path) => path.point(u),
        }
    }

    /// Unit tangent at arc-length fraction `u`, by central difference.
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        let u0 = (u - TANGENT_DELTA).max(0.0);
        let u1 = (u + TANGENT_DELTA).min(1.0);
        (self.point_at(u1) - self.point_at(u0)).normalize_or_zero()
    }

    /// `divisions + 1` points evenly spaced by arc length.
    pub fn spaced_points(&self, divisions: usize) -> Vec<DVec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    /// First point of the curve.
    pub fn start(&self) -> DVec3 {
        self.point(0.0)
    }

    /// Last point of the curve.
    pub fn end(&self) -> DVec3 {
        self.point(1.0)
    }

    /// Total length (tabulated for splines, exact for polylines).
    pub fn length(&self) -> f64 {
        match self {
            Curve::Spline(spline) => spline.arc_lengths().total(),
            Curve::Polyline(path) => path.length(),
        }
    }
}

impl From<CatmullRom> for Curve {
    fn from(spline: CatmullRom) -> Self {
        Curve::Spline(spline)
    }
}

impl From<PolylinePath> for Curve {
    fn from(path: PolylinePath) -> Self {
        Curve::Polyline(path)
    }
}

/// Cumulative chord lengths sampled at uniform raw parameters, used to
/// invert arc length back to the raw parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    /// Tabulates `f` over `divisions` uniform steps of `t`.
    pub fn tabulate(divisions: usize, f: impl Fn(f64) -> DVec3) -> Self {
        let divisions = divisions.max(1);
        let mut cumulative = Vec::with_capacity(divisions + 1);
        let mut last = f(0.0);
        let mut sum = 0.0;
        cumulative.push(0.0);
        for i in 1..=divisions {
            let current = f(i as f64 / divisions as f64);
            sum += current.distance(last);
            cumulative.push(sum);
            last = current;
        }
        Self { cumulative }
    }

    /// Total tabulated length.
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Maps arc-length fraction `u` to the raw parameter `t`.
    pub fn u_to_t(&self, u: f64) -> f64 {
        if u <= 0.0 {
            return 0.0;
        }
        if u >= 1.0 {
            return 1.0;
        }
        let total = self.total();
        if total <= 0.0 {
            return u;
        }

        let target = u * total;
        let last = self.cumulative.len() - 1;
        // First index whose cumulative length reaches the target
        let hi = self
            .cumulative
            .partition_point(|&len| len < target)
            .clamp(1, last);
        let lo = hi - 1;

        let before = self.cumulative[lo];
        let span = self.cumulative[hi] - before;
        let fraction = if span > 0.0 {
            (target - before) / span
        } else {
            0.0
        };
        (lo as f64 + fraction) / last as f64
    }
}
