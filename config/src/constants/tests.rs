//! Tests for the pipeline configuration snapshot.

use super::*;

/// Ensures the default configuration uses the shared constants.
#[test]
fn default_config_matches_constants() {
    let cfg = PipelineConfig::default();
    assert_eq!(cfg.sweep_steps, SWEEP_STEPS);
    assert_eq!(cfg.arc_segments, ARC_SEGMENTS);
    assert_eq!(cfg.profile_arc_segments, PROFILE_ARC_SEGMENTS);
    assert_eq!(cfg.desired_surface_gap, DESIRED_SURFACE_GAP);
    assert!(cfg.tolerance > 0.0);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        PipelineConfig::new(0.0, 120, 32, 12, 1.0).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        PipelineConfig::new(1.0e-9, 0, 32, 12, 1.0).unwrap_err(),
        ConfigError::InvalidSweepSteps(0)
    );
    assert_eq!(
        PipelineConfig::new(1.0e-9, 120, 1, 12, 1.0).unwrap_err(),
        ConfigError::InvalidSegments(1)
    );
    assert_eq!(
        PipelineConfig::new(1.0e-9, 120, 32, 12, -1.0).unwrap_err(),
        ConfigError::InvalidSurfaceGap(-1.0)
    );
}

#[test]
fn nan_tolerance_is_rejected() {
    assert!(PipelineConfig::new(f64::NAN, 120, 32, 12, 1.0).is_err());
}

#[test]
fn error_display_names_the_field() {
    let err = ConfigError::InvalidSweepSteps(0);
    assert!(err.to_string().contains("sweep_steps"));
}
