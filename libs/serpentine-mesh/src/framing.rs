//! # Scene Framing
//!
//! Pure helpers the viewer uses to frame the tube: camera distance, ground
//! height and the square of reference axes drawn behind the object.
//!
//! These depend only on the face size. The camera estimate works with
//! [`CAMERA_FRAMING_SURFACE_GAP`] while the ground and axes use the published
//! [`DESIRED_SURFACE_GAP`].

use config::constants::{
    BASE_CAMERA_DISTANCE, CAMERA_FRAMING_SURFACE_GAP, CAMERA_REFERENCE_EXTENT,
    DESIRED_SURFACE_GAP, GROUND_CLEARANCE_FACES, MIN_FRAMING_WIDTH,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Bend radius, lobe spacing and overall height for a surface gap.
fn vertical_extent(face_size: f64, surface_gap: f64) -> (f64, f64, f64) {
    let bend_radius = (surface_gap + face_size) / 2.0;
    let vertical_gap = 2.0 * bend_radius + surface_gap + face_size;
    let height = vertical_gap + 2.0 * bend_radius + face_size;
    (bend_radius, vertical_gap, height)
}

/// Camera distance that keeps the object at a consistent apparent size.
///
/// # Example
///
/// ```rust
/// use serpentine_mesh::framing::camera_distance;
///
/// // Height 14.8 stays under the minimum width of 20
/// assert!((camera_distance(0.7) - 14.0 * 20.0 / 12.0).abs() < 1e-12);
/// ```
pub fn camera_distance(face_size: f64) -> f64 {
    let (_, _, height) = vertical_extent(face_size, CAMERA_FRAMING_SURFACE_GAP);
    let width = MIN_FRAMING_WIDTH.max(face_size * 4.0);
    BASE_CAMERA_DISTANCE * height.max(width) / CAMERA_REFERENCE_EXTENT
}

/// Lowest point of the bottom S-curve's outer surface.
pub fn serpentine_bottom(face_size: f64) -> f64 {
    let (bend_radius, vertical_gap, _) = vertical_extent(face_size, DESIRED_SURFACE_GAP);
    -vertical_gap / 2.0 - 2.0 * bend_radius - face_size / 2.0
}

/// Height of the shadow-catching ground plane.
pub fn ground_level(face_size: f64) -> f64 {
    serpentine_bottom(face_size) - GROUND_CLEARANCE_FACES * face_size
}

/// One tick mark along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Distance from the axis origin.
    pub offset: f64,
    /// Major ticks are drawn darker.
    pub major: bool,
}

/// Square pair of reference axes centred on the object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    /// Corner where the two axes meet.
    pub origin: DVec2,
    /// Length of each axis.
    pub size: f64,
    pub tick_interval: f64,
    pub major_interval: f64,
    pub tick_length: f64,
}

impl AxisFrame {
    /// Axis square for the object built with `face_size`.
    pub fn for_face_size(face_size: f64) -> Self {
        let (bend_radius, vertical_gap, height) = vertical_extent(face_size, DESIRED_SURFACE_GAP);
        let top = vertical_gap / 2.0 + face_size / 2.0;
        let bottom = -vertical_gap / 2.0 - 2.0 * bend_radius - face_size / 2.0;
        let center = DVec2::new(0.0, (top + bottom) / 2.0);

        // Object height plus a quarter height margin each side, shrunk to 80%
        let size = (height + height / 2.0) * 0.8;
        let (tick_interval, major_interval) = if size > 50.0 {
            (2.0, 10.0)
        } else if size < 10.0 {
            (0.5, 2.5)
        } else {
            (1.0, 5.0)
        };

        Self {
            origin: center - DVec2::splat(size / 2.0),
            size,
            tick_interval,
            major_interval,
            tick_length: size * 0.03,
        }
    }

    /// Horizontal axis endpoints.
    pub fn x_axis(&self) -> [DVec2; 2] {
        [self.origin, self.origin + DVec2::new(self.size, 0.0)]
    }

    /// Vertical axis endpoints.
    pub fn y_axis(&self) -> [DVec2; 2] {
        [self.origin, self.origin + DVec2::new(0.0, self.size)]
    }

    /// Ticks from one interval past the origin up to the axis length.
    pub fn ticks(&self) -> Vec<Tick> {
        let count = (self.size / self.tick_interval + 1e-9).floor() as usize;
        (1..=count)
            .map(|k| {
                let offset = k as f64 * self.tick_interval;
                Tick {
                    offset,
                    major: offset % self.major_interval < 0.01,
                }
            })
            .collect()
    }
}
