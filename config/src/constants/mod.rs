//! # Configuration Constants
//!
//! Centralized constants for the serpentine tube pipeline. Parameter
//! defaults, layout clearances, tessellation resolution and cap placement
//! factors are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Parameters**: Defaults and ratios used when sanitizing raw input
//! - **Layout**: Surface clearances feeding the derived layout
//! - **Resolution**: Curve, profile and sweep sampling counts
//! - **Caps**: Placement of the externally loaded end pieces

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!((1.0_f64 - (1.0 + 1e-11)).abs() < EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used when checking that two swept vertices coincide.
///
/// Sweeping works in f64, so shared seam vertices agree far below this.
///
/// # Examples
/// ```
/// use config::constants::{EPSILON, VERTEX_MERGE_EPSILON};
/// assert!(VERTEX_MERGE_EPSILON >= EPSILON);
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

// =============================================================================
// PARAMETER CONSTANTS
// =============================================================================

/// Total centerline length used when the raw input is unusable.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TOTAL_LENGTH;
/// assert_eq!(DEFAULT_TOTAL_LENGTH, 85.75);
/// ```
pub const DEFAULT_TOTAL_LENGTH: f64 = 85.75;

/// Bore diameter used when the raw input is unusable.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_HOLE_DIAMETER;
/// assert_eq!(DEFAULT_HOLE_DIAMETER, 0.5);
/// ```
pub const DEFAULT_HOLE_DIAMETER: f64 = 0.5;

/// Face size as a multiple of the bore diameter.
///
/// Used both for the default face and for resetting an invalid one.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_HOLE_DIAMETER, FACE_TO_HOLE_RATIO};
/// let face = DEFAULT_HOLE_DIAMETER * FACE_TO_HOLE_RATIO;
/// assert!(face > DEFAULT_HOLE_DIAMETER);
/// ```
pub const FACE_TO_HOLE_RATIO: f64 = 1.4;

/// Smallest accepted face-to-bore ratio. A face at or below
/// `hole * MIN_FACE_TO_HOLE_RATIO` leaves no wall and is reset.
///
/// # Examples
/// ```
/// use config::constants::{FACE_TO_HOLE_RATIO, MIN_FACE_TO_HOLE_RATIO};
/// assert!(MIN_FACE_TO_HOLE_RATIO < FACE_TO_HOLE_RATIO);
/// ```
pub const MIN_FACE_TO_HOLE_RATIO: f64 = 1.1;

/// Numerator of the length slider mapping: `length = 8575 / slider`.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SLIDER_VALUE, SLIDER_LENGTH_NUMERATOR};
/// assert_eq!(SLIDER_LENGTH_NUMERATOR / DEFAULT_SLIDER_VALUE, 85.75);
/// ```
pub const SLIDER_LENGTH_NUMERATOR: f64 = 8575.0;

/// Length slider position used when the control reports garbage.
pub const DEFAULT_SLIDER_VALUE: f64 = 100.0;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Clearance between adjacent tube surfaces in the published geometry.
///
/// Not the same value as [`CAMERA_FRAMING_SURFACE_GAP`]; the two are kept
/// apart on purpose until the product owner decides which one is right.
///
/// # Examples
/// ```
/// use config::constants::DESIRED_SURFACE_GAP;
/// let face = 0.7;
/// let bend_radius = (DESIRED_SURFACE_GAP + face) / 2.0;
/// assert!((bend_radius - 0.85).abs() < 1e-12);
/// ```
pub const DESIRED_SURFACE_GAP: f64 = 1.0;

/// Clearance assumed by the camera-fit estimate.
///
/// # Examples
/// ```
/// use config::constants::{CAMERA_FRAMING_SURFACE_GAP, DESIRED_SURFACE_GAP};
/// assert_ne!(CAMERA_FRAMING_SURFACE_GAP, DESIRED_SURFACE_GAP);
/// ```
pub const CAMERA_FRAMING_SURFACE_GAP: f64 = 4.0;

/// Number of 180° bends the full centerline reserves arc length for
/// (two in the S-curves, one in the connector).
pub const RESERVED_BENDS: f64 = 3.0;

/// Number of straight runs the remaining length is split into.
pub const STRAIGHT_RUNS: f64 = 4.0;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Angular samples per half-turn of a serpentine bend and per connector arc.
///
/// # Examples
/// ```
/// use config::constants::ARC_SEGMENTS;
/// assert!(ARC_SEGMENTS >= 8);
/// ```
pub const ARC_SEGMENTS: u32 = 32;

/// Number of sweep subdivisions along each curve.
///
/// # Examples
/// ```
/// use config::constants::SWEEP_STEPS;
/// assert_eq!(SWEEP_STEPS, 120);
/// ```
pub const SWEEP_STEPS: u32 = 120;

/// Segments used for each quarter-circle corner of the profile. The half
/// bore uses twice as many.
///
/// # Examples
/// ```
/// use config::constants::PROFILE_ARC_SEGMENTS;
/// assert!(PROFILE_ARC_SEGMENTS >= 2);
/// ```
pub const PROFILE_ARC_SEGMENTS: u32 = 12;

/// Turn between adjacent profile edges, in degrees, above which the sweep
/// splits the vertex so shading stays sharp across the corner. The split-line
/// corners always exceed it; arc steps only do at very coarse resolutions.
///
/// # Examples
/// ```
/// use config::constants::CREASE_ANGLE_DEGREES;
/// assert!(CREASE_ANGLE_DEGREES < 90.0);
/// ```
pub const CREASE_ANGLE_DEGREES: f64 = 60.0;

/// Smallest outer face size a profile is built with.
pub const MIN_PROFILE_OUTER_SIZE: f64 = 0.05;

/// Smallest bore size a profile is built with.
pub const MIN_PROFILE_INNER_SIZE: f64 = MIN_PROFILE_OUTER_SIZE * 0.5;

/// Smallest corner radius and bore radius of a profile.
pub const MIN_PROFILE_RADIUS: f64 = MIN_PROFILE_OUTER_SIZE * 0.25;

// =============================================================================
// CAP CONSTANTS
// =============================================================================

/// Name of the end-piece asset requested from the cap source.
pub const CAP_ASSET_NAME: &str = "TL_Cap.obj";

/// Cap scale per unit of bore diameter. The template is modelled at a fixed
/// nominal bore, this brings it to the current one.
///
/// # Examples
/// ```
/// use config::constants::CAP_SCALE_PER_HOLE;
/// assert!((CAP_SCALE_PER_HOLE * 0.5 - 0.1).abs() < 1e-12);
/// ```
pub const CAP_SCALE_PER_HOLE: f64 = 0.2;

// =============================================================================
// FRAMING CONSTANTS
// =============================================================================

/// Camera distance the framing estimate is calibrated against.
pub const BASE_CAMERA_DISTANCE: f64 = 14.0;

/// Object extent that maps to [`BASE_CAMERA_DISTANCE`].
pub const CAMERA_REFERENCE_EXTENT: f64 = 12.0;

/// Lower bound of the rough width estimate used for camera framing.
pub const MIN_FRAMING_WIDTH: f64 = 20.0;

/// Ground plane drop below the lowest tube, in face sizes.
pub const GROUND_CLEARANCE_FACES: f64 = 0.6;

// =============================================================================
// PIPELINE CONFIG
// =============================================================================

/// Immutable snapshot of the tunable pipeline settings, injected into the
/// lifecycle manager.
///
/// # Examples
/// ```
/// use config::constants::PipelineConfig;
/// let config = PipelineConfig::default();
/// assert_eq!(config.sweep_steps, 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Numeric tolerance propagated into geometry checks.
    pub tolerance: f64,
    /// Sweep subdivisions along each curve.
    pub sweep_steps: u32,
    /// Samples per half-turn for bends and the connector arc.
    pub arc_segments: u32,
    /// Segments per quarter corner of the cross-section.
    pub profile_arc_segments: u32,
    /// Surface clearance used by the published layout.
    pub desired_surface_gap: f64,
}

impl PipelineConfig {
    /// Builds a configuration, rejecting values the kernel cannot tessellate.
    ///
    /// # Examples
    /// ```
    /// use config::constants::PipelineConfig;
    /// let cfg = PipelineConfig::new(1.0e-9, 60, 16, 6, 1.0).expect("valid config");
    /// assert_eq!(cfg.sweep_steps, 60);
    /// ```
    pub fn new(
        tolerance: f64,
        sweep_steps: u32,
        arc_segments: u32,
        profile_arc_segments: u32,
        desired_surface_gap: f64,
    ) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if sweep_steps == 0 {
            return Err(ConfigError::InvalidSweepSteps(sweep_steps));
        }
        if arc_segments < 2 {
            return Err(ConfigError::InvalidSegments(arc_segments));
        }
        if profile_arc_segments == 0 {
            return Err(ConfigError::InvalidSegments(profile_arc_segments));
        }
        if !desired_surface_gap.is_finite() || desired_surface_gap < 0.0 {
            return Err(ConfigError::InvalidSurfaceGap(desired_surface_gap));
        }
        Ok(Self {
            tolerance,
            sweep_steps,
            arc_segments,
            profile_arc_segments,
            desired_surface_gap,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: VERTEX_MERGE_EPSILON,
            sweep_steps: SWEEP_STEPS,
            arc_segments: ARC_SEGMENTS,
            profile_arc_segments: PROFILE_ARC_SEGMENTS,
            desired_surface_gap: DESIRED_SURFACE_GAP,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when a sweep would have no subdivisions.
    InvalidSweepSteps(u32),
    /// Raised when an arc segment count is too small to approximate a bend.
    InvalidSegments(u32),
    /// Raised when the surface gap is negative or not finite.
    InvalidSurfaceGap(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidSweepSteps(value) => {
                write!(f, "sweep_steps must be >= 1: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "segment count too small: {value}")
            }
            ConfigError::InvalidSurfaceGap(value) => {
                write!(f, "surface gap must be finite and >= 0: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
