//! # Config Crate
//!
//! Centralized configuration constants for the serpentine tube pipeline.
//! Every magic number the geometry kernel, the lifecycle manager and the
//! wasm bridge rely on is defined here once.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_HOLE_DIAMETER, FACE_TO_HOLE_RATIO};
//!
//! let face = DEFAULT_HOLE_DIAMETER * FACE_TO_HOLE_RATIO;
//! assert!((face - 0.7).abs() < 1e-12);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
