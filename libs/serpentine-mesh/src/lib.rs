//! # Serpentine Mesh
//!
//! Procedural geometry kernel for a split serpentine tube: a hollow tube with
//! a rounded square face and a circular bore, following two stacked S-curves
//! joined by a semicircular connector, and cut lengthwise into two halves.
//!
//! ## Architecture
//!
//! ```text
//! raw input → params → curve ─┐
//!                    → profile ┴→ sweep → 6 × Mesh
//! ```
//!
//! - **params**: sanitizing and the derived layout
//! - **curve**: S-curves (Catmull-Rom) and the connector (polyline)
//! - **profile**: left/right halves of the split cross-section
//! - **sweep**: rotation-minimizing extrusion along a curve
//! - **assembly**: the six tubes of one rebuild
//! - **framing**: camera, ground and axis helpers for the viewer
//!
//! Everything is pure: the same input always produces the same meshes, and
//! no function here touches a scene.
//!
//! ## Usage
//!
//! ```rust
//! use serpentine_mesh::build_tubes;
//! use config::constants::PipelineConfig;
//!
//! let assembly = build_tubes(85.75, f64::NAN, 0.5, &PipelineConfig::default()).unwrap();
//! assert_eq!(assembly.tubes.len(), 6);
//! ```

pub mod assembly;
pub mod curve;
pub mod error;
pub mod framing;
pub mod mesh;
pub mod params;
pub mod profile;
pub mod sweep;

pub use assembly::{CurveRole, TubeAssembly, TubeKey, TubeMesh};
pub use error::MeshError;
pub use mesh::Mesh;
pub use params::{DerivedLayout, GeometryParameters};
pub use profile::{CrossSectionProfile, ProfileSide};

use config::constants::PipelineConfig;

/// Sanitizes raw input and builds the six tubes.
///
/// This is the main entry point of the kernel.
///
/// # Errors
///
/// [`MeshError::DegenerateLayout`] when the length cannot hold the bends.
pub fn build_tubes(
    raw_length: f64,
    raw_face: f64,
    raw_hole: f64,
    config: &PipelineConfig,
) -> Result<TubeAssembly, MeshError> {
    let parameters = params::sanitize(raw_length, raw_face, raw_hole);
    assembly::build_tubes(&parameters, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_build_default_scene() {
        let assembly = build_tubes(85.75, 0.7, 0.5, &PipelineConfig::default()).unwrap();
        assert_eq!(assembly.tubes.len(), 6);
        for tube in &assembly.tubes {
            // 53 profile points plus 4 split-line corners
            assert_eq!(tube.mesh.vertex_count(), 121 * 57);
        }
    }

    #[test]
    fn test_build_tolerates_garbage() {
        let assembly =
            build_tubes(f64::NAN, f64::NEG_INFINITY, -0.0, &PipelineConfig::default()).unwrap();
        assert_eq!(assembly.parameters, GeometryParameters::default());
    }

    /// A full rebuild runs on every slider event.
    #[test]
    fn test_performance_rebuild() {
        let config = PipelineConfig::default();
        let _ = build_tubes(85.75, 0.7, 0.5, &config).unwrap();

        let start = Instant::now();
        let assembly = build_tubes(171.5, 1.4, 1.0, &config).unwrap();
        let elapsed = start.elapsed();

        println!("Rebuild time: {:?}", elapsed);
        println!(
            "Triangles: {}",
            assembly.tubes.iter().map(|t| t.mesh.triangle_count()).sum::<usize>()
        );

        assert!(elapsed.as_millis() < 500, "Rebuild took too long: {:?}", elapsed);
    }
}
