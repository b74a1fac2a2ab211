//! Tile grid enumeration.
//!
//! Walks every tile address from zoom 0 up to a maximum, ordered by zoom,
//! then row, then column. The walk is lazy and single-pass; the total
//! count is known up front so callers can report progress without
//! materializing the sequence.

use std::iter::FusedIterator;

use crate::coord::{self, Bounds, TileAddress, TileRange};
use crate::error::ConfigError;

/// Pyramids above this many tiles are logged as a warning.
pub const LARGE_PYRAMID_TILES: u64 = 1_000_000;

/// Start a whole-world walk up to `max_zoom` inclusive.
pub fn enumerate(max_zoom: i64) -> Result<PyramidIter, ConfigError> {
    Ok(TilePyramid::new(max_zoom)?.into_iter())
}

/// Number of tiles in a whole-world pyramid: the sum of `4^z` for
/// `z = 0..=max_zoom`.
pub fn pyramid_tile_count(max_zoom: i64) -> Result<u64, ConfigError> {
    let max_zoom = coord::validate_zoom(max_zoom)?;
    Ok(((1u64 << (2 * (max_zoom as u32 + 1))) - 1) / 3)
}

/// The set of tiles covering an area from zoom 0 to a maximum zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePyramid {
    max_zoom: u8,
    bounds: Bounds,
    levels: Vec<TileRange>,
}

impl TilePyramid {
    /// Whole-world pyramid.
    pub fn new(max_zoom: i64) -> Result<Self, ConfigError> {
        Self::with_bounds(max_zoom, Bounds::world())
    }

    /// Pyramid restricted to the tiles intersecting `bounds`.
    pub fn with_bounds(max_zoom: i64, bounds: Bounds) -> Result<Self, ConfigError> {
        let max_zoom = coord::validate_zoom(max_zoom)?;
        let levels = (0..=max_zoom)
            .map(|zoom| coord::tile_range(&bounds, zoom))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            max_zoom,
            bounds,
            levels,
        })
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Tile range at one zoom level, if inside the pyramid.
    pub fn level(&self, zoom: u8) -> Option<&TileRange> {
        self.levels.get(zoom as usize)
    }

    /// Tiles at one zoom level.
    pub fn level_count(&self, zoom: u8) -> u64 {
        self.level(zoom).map_or(0, TileRange::len)
    }

    /// Tiles across all levels.
    pub fn total_tiles(&self) -> u64 {
        self.levels.iter().map(TileRange::len).sum()
    }

    pub fn contains(&self, tile: &TileAddress) -> bool {
        self.level(tile.zoom()).is_some_and(|range| range.contains(tile))
    }

    /// Lazy walk over the pyramid.
    pub fn iter(&self) -> PyramidIter {
        self.clone().into_iter()
    }
}

impl IntoIterator for TilePyramid {
    type Item = TileAddress;
    type IntoIter = PyramidIter;

    fn into_iter(self) -> PyramidIter {
        let remaining = self.total_tiles();
        let cursor = self
            .levels
            .first()
            .map(|range| (0, range.min_col, range.min_row));
        PyramidIter {
            levels: self.levels,
            cursor,
            remaining,
        }
    }
}

/// Iterator over tile addresses, zoom ascending, then row, then column.
#[derive(Debug, Clone)]
pub struct PyramidIter {
    levels: Vec<TileRange>,
    /// Next (level index, col, row) to yield.
    cursor: Option<(usize, u32, u32)>,
    remaining: u64,
}

impl PyramidIter {
    /// Tiles not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for PyramidIter {
    type Item = TileAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let (level, col, row) = self.cursor?;
        let range = self.levels[level];
        let tile = TileAddress::from_parts(range.zoom, col, row);

        self.cursor = if col < range.max_col {
            Some((level, col + 1, row))
        } else if row < range.max_row {
            Some((level, range.min_col, row + 1))
        } else {
            self.levels
                .get(level + 1)
                .map(|next| (level + 1, next.min_col, next.min_row))
        };
        self.remaining -= 1;

        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for PyramidIter {}
