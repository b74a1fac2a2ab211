//! Progress reporting for generation runs.
//!
//! Progress is reported through a callback that can be wired to a
//! terminal progress line or to logging. It must be `Send + Sync` since
//! parallel runs invoke it from worker threads.

use std::sync::Arc;

/// Progress callback for generation runs.
pub type ProgressCallback = Arc<dyn Fn(GenerationProgress) + Send + Sync>;

/// Snapshot of a run's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    /// Tiles written so far.
    pub tiles_done: u64,
    /// Tiles in the whole run.
    pub tiles_total: u64,
    /// Zoom level of the tile just finished.
    pub zoom: u8,
}

impl GenerationProgress {
    /// Completion as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.tiles_total == 0 {
            return 1.0;
        }
        self.tiles_done as f64 / self.tiles_total as f64
    }

    pub fn is_complete(&self) -> bool {
        self.tiles_done >= self.tiles_total
    }
}
