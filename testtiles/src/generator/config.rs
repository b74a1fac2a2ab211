//! Tileset generation settings.

use crate::coord::{validate_extent, Bounds, DEFAULT_EXTENT};
use crate::error::ConfigError;
use crate::synth::{PropertyProfile, TemporalRange};

/// Default maximum zoom level.
pub const DEFAULT_MAX_ZOOM: i64 = 4;

/// Default points per tile.
pub const DEFAULT_COUNT: i64 = 100;

/// Default layer name.
pub const DEFAULT_LAYER_NAME: &str = "points";

/// Parameters for one generation run.
///
/// Zoom and count are signed so that bad input from callers reaches
/// [`TilesetConfig::validate`] and is reported as a [`ConfigError`].
#[derive(Debug, Clone, PartialEq)]
pub struct TilesetConfig {
    /// Highest zoom level generated (inclusive).
    pub max_zoom: i64,
    /// Points per tile.
    pub count: i64,
    /// Local coordinate resolution of every tile.
    pub extent: u32,
    /// Name of the single point layer.
    pub layer_name: String,
    /// Base random seed. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Area to cover.
    pub bounds: Bounds,
    /// Properties attached to each point.
    pub profile: PropertyProfile,
    /// Time span used by the vessel profile.
    pub temporal: TemporalRange,
    /// Worker threads; 1 runs on the calling thread.
    pub threads: usize,
}

impl Default for TilesetConfig {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
            count: DEFAULT_COUNT,
            extent: DEFAULT_EXTENT,
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            seed: None,
            bounds: Bounds::world(),
            profile: PropertyProfile::Minimal,
            temporal: TemporalRange::default(),
            threads: 1,
        }
    }
}

impl TilesetConfig {
    pub fn new(max_zoom: i64, count: i64) -> Self {
        Self {
            max_zoom,
            count,
            ..Self::default()
        }
    }

    pub fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = name.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_profile(mut self, profile: PropertyProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_temporal(mut self, temporal: TemporalRange) -> Self {
        self.temporal = temporal;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Check every parameter without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::coord::validate_zoom(self.max_zoom)?;
        crate::synth::validate_count(self.count)?;
        validate_extent(self.extent)?;
        if self.layer_name.is_empty() {
            return Err(ConfigError::EmptyLayerName);
        }
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }
}
