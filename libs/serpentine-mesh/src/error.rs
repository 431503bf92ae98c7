//! # Mesh Errors
//!
//! Error types for layout derivation, curve construction and sweeping.

use thiserror::Error;

/// Errors that can occur while generating tube geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// The requested length cannot fit the reserved bends.
    #[error(
        "Degenerate layout: straight segment length {line_segment_length} <= 0 \
         (total length {total_length}, reserved arc length {reserved_arc_length})"
    )]
    DegenerateLayout {
        total_length: f64,
        reserved_arc_length: f64,
        line_segment_length: f64,
    },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Curve cannot be evaluated
    #[error("Invalid curve: {message}")]
    InvalidCurve { message: String },

    /// Raw vertex or index buffers do not describe a mesh
    #[error("Malformed buffers: {message}")]
    MalformedBuffers { message: String },
}

impl MeshError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid curve error.
    pub fn invalid_curve(message: impl Into<String>) -> Self {
        Self::InvalidCurve {
            message: message.into(),
        }
    }

    /// Creates a malformed buffers error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBuffers {
            message: message.into(),
        }
    }

    /// Returns true for the recoverable "length too short" condition.
    pub fn is_degenerate_layout(&self) -> bool {
        matches!(self, Self::DegenerateLayout { .. })
    }
}
