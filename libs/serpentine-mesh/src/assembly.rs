//! # Tube Assembly
//!
//! One full rebuild of the kernel: sanitized parameters in, six swept half
//! tubes out (three centerlines × two profile halves).

use config::constants::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::{CenterlineSet, Curve};
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::params::{derive_layout, DerivedLayout, GeometryParameters};
use crate::profile::{CrossSectionProfile, ProfileSide};
use crate::sweep::sweep;

/// Which centerline a tube follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveRole {
    Top,
    Bottom,
    Connector,
}

impl CurveRole {
    /// All roles in build order.
    pub const ALL: [CurveRole; 3] = [CurveRole::Top, CurveRole::Bottom, CurveRole::Connector];

    pub fn name(self) -> &'static str {
        match self {
            CurveRole::Top => "top",
            CurveRole::Bottom => "bottom",
            CurveRole::Connector => "connector",
        }
    }
}

/// Identifies one of the six tubes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TubeKey {
    pub role: CurveRole,
    pub side: ProfileSide,
}

impl fmt::Display for TubeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.role.name(), self.side.name())
    }
}

/// A swept half tube.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    pub key: TubeKey,
    pub mesh: Mesh,
}

/// Output of one kernel rebuild.
#[derive(Debug, Clone)]
pub struct TubeAssembly {
    pub parameters: GeometryParameters,
    pub layout: DerivedLayout,
    pub centerlines: CenterlineSet,
    /// Ordered top-left, top-right, bottom-left, bottom-right,
    /// connector-left, connector-right.
    pub tubes: Vec<TubeMesh>,
}

impl TubeAssembly {
    /// Looks up one tube.
    pub fn tube(&self, key: TubeKey) -> Option<&TubeMesh> {
        self.tubes.iter().find(|tube| tube.key == key)
    }

    /// Tubes of one half, in role order.
    pub fn half(&self, side: ProfileSide) -> impl Iterator<Item = &TubeMesh> {
        self.tubes.iter().filter(move |tube| tube.key.side == side)
    }
}

/// Derives the layout, builds the centerlines and profiles, and sweeps the
/// six tubes.
///
/// # Errors
///
/// [`MeshError::DegenerateLayout`] when the length is too short for the
/// bends; curve and sweep errors otherwise.
pub fn build_tubes(
    parameters: &GeometryParameters,
    config: &PipelineConfig,
) -> Result<TubeAssembly, MeshError> {
    let layout = derive_layout(parameters, config.desired_surface_gap)?;
    let centerlines = CenterlineSet::from_layout(&layout, config.arc_segments)?;
    let profiles = build_profiles(parameters, config.profile_arc_segments);
    let tubes = sweep_all(&centerlines, &profiles, config.sweep_steps)?;
    check_tubes(&tubes, config.tolerance)?;

    Ok(TubeAssembly {
        parameters: *parameters,
        layout,
        centerlines,
        tubes,
    })
}

/// Left and right cross-sections for `parameters`.
pub fn build_profiles(
    parameters: &GeometryParameters,
    corner_segments: u32,
) -> [CrossSectionProfile; 2] {
    ProfileSide::ALL.map(|side| {
        CrossSectionProfile::with_segments(
            side,
            parameters.face_size,
            parameters.hole_diameter,
            corner_segments,
        )
    })
}

/// Sweeps every profile along every centerline, in [`TubeAssembly::tubes`]
/// order.
pub fn sweep_all(
    centerlines: &CenterlineSet,
    profiles: &[CrossSectionProfile],
    steps: u32,
) -> Result<Vec<TubeMesh>, MeshError> {
    let mut tubes = Vec::with_capacity(CurveRole::ALL.len() * profiles.len());
    for role in CurveRole::ALL {
        let curve = centerline(centerlines, role);
        for profile in profiles {
            let key = TubeKey {
                role,
                side: profile.side(),
            };
            let mesh = sweep(profile, curve, steps)?;
            tracing::trace!(
                tube = %key,
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "swept tube"
            );
            tubes.push(TubeMesh { key, mesh });
        }
    }
    Ok(tubes)
}

/// Rejects tubes with out-of-range indices or triangles smaller than
/// `tolerance`.
pub fn check_tubes(tubes: &[TubeMesh], tolerance: f64) -> Result<(), MeshError> {
    match tubes.iter().find(|tube| !tube.mesh.validate_with(tolerance)) {
        Some(tube) => Err(MeshError::degenerate(format!(
            "{} has triangles below tolerance {tolerance}",
            tube.key
        ))),
        None => Ok(()),
    }
}

fn centerline(set: &CenterlineSet, role: CurveRole) -> &Curve {
    match role {
        CurveRole::Top => &set.top,
        CurveRole::Bottom => &set.bottom,
        CurveRole::Connector => &set.connector,
    }
}
