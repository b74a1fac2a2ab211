//! Directory tree writer.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};

use super::{TileFormat, TileSink, TilesetHeader, VesselInfo, HEADER_FILE_NAME, INFO_FILE_NAME};
use crate::coord::TileAddress;
use crate::error::GenerateError;
use crate::generator::{series_group, EncodedTile};

/// Directory under the root holding one tileset per series group.
pub const SERIES_DIR_NAME: &str = "sub";

/// Writes tiles to `<root>/<zoom>/<col>/<row>.<ext>`.
///
/// Each payload goes to a temporary sibling first and is renamed into
/// place, so an interrupted run never leaves a truncated tile behind.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    root: PathBuf,
    format: TileFormat,
    series: Option<TilesetHeader>,
}

impl DirectoryWriter {
    /// Create the root directory if needed.
    pub fn new(root: impl Into<PathBuf>, format: TileFormat) -> Result<Self, GenerateError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| GenerateError::io(&root, e))?;
        debug!(root = %root.display(), format = %format, "Output directory ready");
        Ok(Self {
            root,
            format,
            series: None,
        })
    }

    /// Also write every tile as the single tile of its series group's own
    /// tileset, with a `header` derived from `header` and a vessel `info`.
    pub fn with_series_tilesets(mut self, header: TilesetHeader) -> Self {
        self.series = Some(header.with_series_tilesets());
        self
    }

    pub fn writes_series_tilesets(&self) -> bool {
        self.series.is_some()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> TileFormat {
        self.format
    }

    /// Path a tile is written to.
    pub fn tile_path(&self, address: &TileAddress) -> PathBuf {
        self.root
            .join(address.zoom().to_string())
            .join(address.col().to_string())
            .join(format!("{}.{}", address.row(), self.format.extension()))
    }

    /// Path of the tileset header.
    pub fn header_path(&self) -> PathBuf {
        self.root.join(HEADER_FILE_NAME)
    }

    /// Root of the tileset for one series group.
    pub fn series_root(&self, group: u64) -> PathBuf {
        self.root
            .join(SERIES_DIR_NAME)
            .join(format!("seriesgroup={}", group))
    }

    /// Path of a series group's only tile, addressed as the root tile.
    pub fn series_tile_path(&self, group: u64) -> PathBuf {
        self.series_root(group)
            .join("0")
            .join("0")
            .join(format!("0.{}", self.format.extension()))
    }

    /// Serialize `header` as JSON next to the zoom directories.
    pub fn write_header(&self, header: &TilesetHeader) -> Result<PathBuf, GenerateError> {
        let path = self.header_path();
        write_json(&path, header)?;
        debug!(path = %path.display(), "Wrote tileset header");
        Ok(path)
    }

    /// Write the vessel `info` document for a series group.
    pub fn write_info(&self, group: u64) -> Result<PathBuf, GenerateError> {
        let path = self.series_root(group).join(INFO_FILE_NAME);
        ensure_parent(&path)?;
        write_json(&path, &VesselInfo::for_series_group(group))?;
        Ok(path)
    }

    fn write_series_tile(
        &self,
        tile: &EncodedTile,
        header: &TilesetHeader,
    ) -> Result<(), GenerateError> {
        let group = series_group(&tile.address);
        let path = self.series_tile_path(group);
        ensure_parent(&path)?;
        write_atomic(&path, &tile.data)?;
        write_json(
            &self.series_root(group).join(HEADER_FILE_NAME),
            &header.for_series_group(group),
        )?;
        self.write_info(group)?;
        trace!(group, path = %path.display(), "Series tileset written");
        Ok(())
    }
}

impl TileSink for DirectoryWriter {
    fn write_tile(&self, tile: &EncodedTile) -> Result<(), GenerateError> {
        let path = self.tile_path(&tile.address);
        ensure_parent(&path)?;
        write_atomic(&path, &tile.data)?;
        trace!(path = %path.display(), bytes = tile.data.len(), "Tile file written");

        if let Some(header) = &self.series {
            self.write_series_tile(tile, header)?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), GenerateError> {
    let json = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &json)
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), GenerateError> {
    let temp_path = temp_path(path);
    let result = fs::File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(GenerateError::io(path, e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
