//! # Sweep
//!
//! Extrudes a closed cross-section along a curve into an open-ended tube
//! wall. No end caps or bevels are generated.
//!
//! ## Layout
//!
//! Ring `i` holds one vertex per profile point, so vertex `(i, j)` lives at
//! index `i * n + j`. Consecutive rings are joined by two triangles per
//! profile edge:
//!
//! ```text
//! ring i+1:  a'──────b'
//!            │    ╱  │
//!            │  ╱    │
//! ring i:    a──────b
//! ```
//!
//! With a counter-clockwise profile this winding makes every face normal
//! point away from the profile's interior.
//!
//! ## Hard corners
//!
//! Profile points where the outline turns by more than
//! [`CREASE_ANGLE_DEGREES`] get a second vertex per ring, so the faces on
//! either side do not share a smoothed normal. The primary vertex `(i, j)`
//! belongs to the edge arriving at the corner; the copy belongs to the edge
//! leaving it. Copies follow all primary rings: the copy of the `c`-th hard
//! corner in ring `i` lives at index `rings * n + i * corners + c`.

mod frames;


pub use frames::{compute_frames, Frame};

use crate::curve::Curve;
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::profile::CrossSectionProfile;
use config::constants::CREASE_ANGLE_DEGREES;
use glam::DVec2;

/// Sweeps `profile` along `curve` with `steps` subdivisions.
///
/// # Errors
///
/// [`MeshError::DegenerateGeometry`] for fewer than 3 profile points or zero
/// steps.
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::curve::serpentine_curve;
/// use serpentine_mesh::profile::left_profile;
/// use serpentine_mesh::sweep::{hard_corners, sweep};
///
/// let curve = serpentine_curve(10.0, 0.0, 0.5, 32).unwrap();
/// let profile = left_profile(0.7, 0.5);
/// let mesh = sweep(&profile, &curve, 120).unwrap();
/// let ring = profile.vertex_count() + hard_corners(profile.points()).len();
/// assert_eq!(mesh.vertex_count(), 121 * ring);
/// ```
pub fn sweep(profile: &CrossSectionProfile, curve: &Curve, steps: u32) -> Result<Mesh, MeshError> {
    sweep_outline(profile.points(), curve, steps)
}

/// Sweeps a raw counter-clockwise outline along `curve`.
pub fn sweep_outline(outline: &[DVec2], curve: &Curve, steps: u32) -> Result<Mesh, MeshError> {
    if outline.len() < 3 {
        return Err(MeshError::degenerate(format!(
            "profile needs at least 3 points, got {}",
            outline.len()
        )));
    }
    if steps == 0 {
        return Err(MeshError::degenerate("sweep needs at least 1 step"));
    }

    let n = outline.len();
    let rings = steps as usize + 1;
    let corners = hard_corners(outline);
    let mut mesh = Mesh::with_capacity((n + corners.len()) * rings, 2 * n * steps as usize);

    let frames = compute_frames(curve, steps);
    for frame in &frames {
        for point in outline {
            mesh.add_vertex(frame.place(point.x, point.y));
        }
    }
    for frame in &frames {
        for &j in &corners {
            mesh.add_vertex(frame.place(outline[j].x, outline[j].y));
        }
    }

    // Vertex the edge leaving point `j` uses in `ring`
    let copies = (rings * n) as u32;
    let leaving = |ring: u32, j: usize| -> u32 {
        match corners.binary_search(&j) {
            Ok(c) => copies + ring * corners.len() as u32 + c as u32,
            Err(_) => ring * n as u32 + j as u32,
        }
    };

    for ring in 0..steps {
        for j in 0..n {
            let k = (j + 1) % n;
            let (a, b) = (leaving(ring, j), ring * n as u32 + k as u32);
            let (a_up, b_up) = (leaving(ring + 1, j), (ring + 1) * n as u32 + k as u32);
            mesh.add_triangle(a, b, b_up);
            mesh.add_triangle(a, b_up, a_up);
        }
    }

    mesh.compute_normals();
    Ok(mesh)
}

/// Indices of the outline points where the outline turns by more than
/// [`CREASE_ANGLE_DEGREES`], in ascending order.
pub fn hard_corners(outline: &[DVec2]) -> Vec<usize> {
    let n = outline.len();
    if n < 3 {
        return Vec::new();
    }
    let threshold = CREASE_ANGLE_DEGREES.to_radians().cos();
    (0..n)
        .filter(|&j| {
            let arriving = (outline[j] - outline[(j + n - 1) % n]).normalize_or_zero();
            let leaving = (outline[(j + 1) % n] - outline[j]).normalize_or_zero();
            arriving.dot(leaving) < threshold
        })
        .collect()
}
