//! # Tube Material
//!
//! Physical material description published with every generation. The
//! renderer owns the GPU material; this crate only decides its parameters
//! and when it is created and released.

use serde::{Deserialize, Serialize};

use crate::handles::MaterialId;

/// Base colour of the tube, as an sRGB hex triplet.
pub const TUBE_COLOR_SRGB: u32 = 0xFE5D00;

/// Brightness boost applied after converting the base colour to linear.
pub const COLOR_BOOST: f64 = 1.4;

/// Converts one sRGB channel in `[0, 1]` to linear light.
///
/// # Example
///
/// ```rust
/// use serpentine_scene::material::srgb_to_linear;
///
/// assert_eq!(srgb_to_linear(0.0), 0.0);
/// assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-12);
/// ```
pub fn srgb_to_linear(channel: f64) -> f64 {
    if channel < 0.04045 {
        channel * 0.077_399_380_8
    } else {
        (channel * 0.947_867_298_6 + 0.052_132_701_4).powf(2.4)
    }
}

/// Physically based material parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Linear RGB; may exceed 1 after the boost.
    pub color: [f64; 3],
    pub metalness: f64,
    pub roughness: f64,
    pub emissive_intensity: f64,
    pub ior: f64,
    pub iridescence: f64,
    pub iridescence_ior: f64,
    pub sheen_color: [f64; 3],
    pub sheen_roughness: f64,
    pub double_sided: bool,
}

impl MaterialSpec {
    /// The saturated orange used for every tube and cap.
    pub fn tube() -> Self {
        let channel = |shift: u32| {
            let srgb = ((TUBE_COLOR_SRGB >> shift) & 0xFF) as f64 / 255.0;
            srgb_to_linear(srgb) * COLOR_BOOST
        };
        Self {
            color: [channel(16), channel(8), channel(0)],
            metalness: 0.2,
            roughness: 0.75,
            emissive_intensity: 0.1,
            ior: 1.3,
            iridescence: 1.0,
            iridescence_ior: 1.3,
            sheen_color: [1.0, 1.0, 1.0],
            sheen_roughness: 0.35,
            double_sided: true,
        }
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self::tube()
    }
}

/// One material instance shared by a generation's tubes and the caps.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedMaterial {
    pub id: MaterialId,
    pub spec: MaterialSpec,
}
