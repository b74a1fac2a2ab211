//! Tile persistence.
//!
//! The generator hands each finished tile to a [`TileSink`]. The file
//! layout is `<root>/<zoom>/<col>/<row>.<ext>`, plus an optional JSON
//! `header` at the root describing the tileset. Vessel runs can also
//! write one single-tile tileset per series group:
//!
//! ```text
//! <root>/
//!  ├── header
//!  ├── <zoom>/<col>/<row>.<ext>
//!  └── sub/seriesgroup=<N>/
//!       ├── header
//!       ├── info
//!       └── 0/0/0.<ext>
//! ```

mod directory;
mod header;
mod info;

pub use directory::{DirectoryWriter, SERIES_DIR_NAME};
pub use header::{ColumnInfo, TilesetHeader, HEADER_FILE_NAME, TILESET_VERSION};
pub use info::{VesselInfo, INFO_FILE_NAME, VESSEL_NAMES};

use std::fmt;
use std::sync::Mutex;

use crate::error::GenerateError;
use crate::generator::EncodedTile;

/// Destination for encoded tiles.
///
/// Implementations must be shareable across worker threads; parallel
/// runs call `write_tile` concurrently and in no particular order.
pub trait TileSink: Send + Sync {
    fn write_tile(&self, tile: &EncodedTile) -> Result<(), GenerateError>;
}

/// File extension used for tile payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileFormat {
    #[default]
    Pbf,
    Mvt,
}

impl TileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Pbf => "pbf",
            TileFormat::Mvt => "mvt",
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Collects tiles in memory. Useful for tests and for callers that ship
/// tiles somewhere other than the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    tiles: Mutex<Vec<EncodedTile>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Tiles in the order they arrived.
    pub fn tiles(&self) -> Vec<EncodedTile> {
        self.lock().clone()
    }

    /// Tiles ordered by zoom, row, col.
    pub fn into_sorted(self) -> Vec<EncodedTile> {
        let mut tiles = self
            .tiles
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        tiles.sort_by_key(|tile| tile.address);
        tiles
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<EncodedTile>> {
        self.tiles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TileSink for MemorySink {
    fn write_tile(&self, tile: &EncodedTile) -> Result<(), GenerateError> {
        self.lock().push(tile.clone());
        Ok(())
    }
}
