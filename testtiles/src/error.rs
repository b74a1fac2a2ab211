//! Error types for tileset generation.
//!
//! Two failure classes exist:
//!
//! - [`ConfigError`] rejects bad parameters (zoom, count, extent, bounds)
//!   before any tile is produced.
//! - [`ValidationError`] is raised by the encoder when a tile would encode
//!   to something a conformant reader cannot interpret. Synthesized tiles
//!   never trigger it; it indicates a logic defect and aborts the run.
//!
//! [`GenerateError`] wraps both together with output failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::coord::{MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

/// Invalid generation parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Zoom level is negative or above the supported maximum.
    #[error("Invalid zoom level: {0} (must be between {min} and {max})", min = MIN_ZOOM, max = MAX_ZOOM)]
    InvalidZoom(i64),

    /// Point count is negative or does not fit in memory.
    #[error("Invalid point count: {0} (must be a non-negative integer)")]
    InvalidCount(i64),

    /// Tile extent is zero or too large for 32-bit geometry parameters.
    #[error("Invalid tile extent: {0} (must be between 1 and {max})", max = i32::MAX)]
    InvalidExtent(u32),

    /// Layer names must be non-empty.
    #[error("Layer name must not be empty")]
    EmptyLayerName,

    /// Latitude outside the Web Mercator range.
    #[error("Invalid latitude: {0} (must be between {min} and {max})", min = MIN_LAT, max = MAX_LAT)]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("Invalid longitude: {0} (must be between {min} and {max})", min = MIN_LON, max = MAX_LON)]
    InvalidLongitude(f64),

    /// Bounding box is malformed.
    #[error("Invalid bounds '{input}': {reason}")]
    InvalidBounds { input: String, reason: String },

    /// Tile column or row outside the grid for its zoom level.
    #[error("Tile {zoom}/{col}/{row} is outside the {size}x{size} grid")]
    TileOutOfGrid {
        zoom: u8,
        col: u32,
        row: u32,
        size: u64,
    },

    /// Quadkey contains invalid characters or is too long.
    #[error("Invalid quadkey: '{0}' (must contain only digits 0-3 and length <= {max})", max = MAX_ZOOM)]
    InvalidQuadkey(String),

    /// Temporal extent must be a positive, finite duration.
    #[error("Invalid temporal extent: {0} ms (must be positive)")]
    InvalidTemporalExtent(f64),

    /// Worker pool needs at least one thread.
    #[error("Invalid thread count: 0 (must be at least 1)")]
    InvalidThreads,

    /// Temporal slicing needs at least one slice.
    #[error("Invalid temporal extent count: 0 (must be at least 1)")]
    InvalidSliceCount,
}

/// A tile that cannot be encoded without corrupting its meaning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A feature coordinate falls outside `[0, extent)`.
    #[error(
        "Feature {feature} in layer '{layer}' has coordinate ({x}, {y}) outside [0, {extent})"
    )]
    CoordinateOutOfRange {
        layer: String,
        feature: usize,
        x: i32,
        y: i32,
        extent: u32,
    },

    /// Layer extent is zero or exceeds the geometry parameter range.
    #[error("Layer '{layer}' has invalid extent {extent}")]
    InvalidExtent { layer: String, extent: u32 },

    /// Layers of one tile must share a single extent.
    #[error("Layer '{layer}' has extent {extent} but the tile uses {expected}")]
    MixedExtent {
        layer: String,
        extent: u32,
        expected: u32,
    },

    /// Layer name is empty.
    #[error("Layer name must not be empty")]
    EmptyLayerName,

    /// Two layers in one tile share a name.
    #[error("Duplicate layer name '{0}' in tile")]
    DuplicateLayer(String),

    /// A feature carries the same property key twice.
    #[error("Feature {feature} in layer '{layer}' repeats property key '{key}'")]
    DuplicateProperty {
        layer: String,
        feature: usize,
        key: String,
    },

    /// The vector tile writer refused the tile.
    #[error("Vector tile encoding failed: {0}")]
    Encoding(String),
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Invalid parameters.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Encoder rejected a tile.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failed to persist output.
    #[error("Failed to write '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Failed to serialize tileset metadata.
    #[error("Failed to serialize tileset header: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Failed to start the worker pool.
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl GenerateError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}
