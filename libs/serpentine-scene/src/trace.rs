//! # Rebuild Tracing
//!
//! Span and timing for one rebuild. Enable output by installing any
//! `tracing` subscriber in the host; set `RUST_LOG=serpentine_scene=debug`
//! for per-step detail.
//!
//! Log levels:
//!
//! - **ERROR**: cap asset failures, kernel failures
//! - **WARN**: rebuild aborted because the length is too short
//! - **INFO**: published generations with counts and timing
//! - **DEBUG**: substituted parameters, cap cache transitions
//! - **TRACE**: per-tube vertex counts

use tracing::Span;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Span around one rebuild that reports its duration when finished.
///
/// `std::time::Instant` is unavailable on `wasm32-unknown-unknown`, so the
/// duration is only measured on native targets.
pub(crate) struct RebuildTimer {
    span: Span,
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
}

impl RebuildTimer {
    pub(crate) fn start(raw_length: f64, raw_face: f64, raw_hole: f64) -> Self {
        let span = tracing::info_span!("rebuild", raw_length, raw_face, raw_hole);
        Self {
            span,
            #[cfg(not(target_arch = "wasm32"))]
            start: Instant::now(),
        }
    }

    /// Runs `f` inside the rebuild span.
    pub(crate) fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    /// Milliseconds since the rebuild started, when measurable.
    pub(crate) fn elapsed_ms(&self) -> Option<f64> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Some(self.start.elapsed().as_secs_f64() * 1000.0)
        }
        #[cfg(target_arch = "wasm32")]
        {
            None
        }
    }
}
