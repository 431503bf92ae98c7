//! # Sweep Frames
//!
//! Rotation-minimizing frames along a curve. Each sample carries a tangent
//! and two axes spanning the plane the cross-section is placed in.

use glam::{DQuat, DVec3};

use crate::curve::Curve;
use config::constants::EPSILON;

/// Orientation of the cross-section plane at one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Point on the curve.
    pub origin: DVec3,
    /// Unit direction of travel.
    pub tangent: DVec3,
    /// Profile `x` axis.
    pub normal: DVec3,
    /// Profile `y` axis, `tangent × normal`.
    pub binormal: DVec3,
}

impl Frame {
    /// Places a profile point `(x, y)` in world space.
    #[inline]
    pub fn place(&self, x: f64, y: f64) -> DVec3 {
        self.origin + x * self.normal + y * self.binormal
    }
}

/// Computes `steps + 1` frames at evenly spaced arc-length fractions.
///
/// The first normal is perpendicular to the first tangent, picked from the
/// world axis the tangent is least aligned with (Z on ties). Later normals
/// are the previous normal rotated by the turn between consecutive tangents,
/// so the frame twists only as much as the curve forces it to.
pub fn compute_frames(curve: &Curve, steps: u32) -> Vec<Frame> {
    let steps = steps.max(1) as usize;
    let mut frames: Vec<Frame> = Vec::with_capacity(steps + 1);
    let mut previous_tangent = DVec3::X;

    for i in 0..=steps {
        let u = i as f64 / steps as f64;
        let origin = curve.point_at(u);
        let mut tangent = curve.tangent_at(u);
        if tangent == DVec3::ZERO {
            tangent = previous_tangent;
        }

        let normal = match frames.last() {
            None => initial_normal(tangent),
            Some(last) => transport(last.normal, last.tangent, tangent),
        };

        frames.push(Frame {
            origin,
            tangent,
            normal,
            binormal: tangent.cross(normal),
        });
        previous_tangent = tangent;
    }

    frames
}

/// Normal perpendicular to `tangent`, built from the least aligned axis.
fn initial_normal(tangent: DVec3) -> DVec3 {
    let abs = tangent.abs();
    let mut min = f64::MAX;
    let mut axis = DVec3::Z;
    for (component, candidate) in [(abs.x, DVec3::X), (abs.y, DVec3::Y), (abs.z, DVec3::Z)] {
        if component <= min {
            min = component;
            axis = candidate;
        }
    }
    let side = tangent.cross(axis).normalize_or_zero();
    tangent.cross(side)
}

/// Rotates `normal` by the rotation that carries `from` onto `to`.
fn transport(normal: DVec3, from: DVec3, to: DVec3) -> DVec3 {
    let axis = from.cross(to);
    if axis.length() <= EPSILON {
        return normal;
    }
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    DQuat::from_axis_angle(axis.normalize(), angle) * normal
}
