//! Coordinate type definitions

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Supported zoom levels.
///
/// Level 24 already holds 2^48 tiles; anything beyond would overflow the
/// 32-bit column/row indices.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 24;

/// Standard vector tile extent.
pub const DEFAULT_EXTENT: u32 = 4096;

/// Slippy-map tile address.
///
/// Column and row are always inside the `2^zoom x 2^zoom` grid; the only
/// constructors check this. Ordering is zoom, then row, then column, which
/// is the order the pyramid enumerates tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileAddress {
    zoom: u8,
    row: u32,
    col: u32,
}

impl TileAddress {
    /// Create an address, rejecting zoom levels and positions outside the grid.
    pub fn new(zoom: u8, col: u32, row: u32) -> Result<Self, ConfigError> {
        if zoom > MAX_ZOOM {
            return Err(ConfigError::InvalidZoom(zoom as i64));
        }
        let size = grid_size(zoom);
        if col >= size || row >= size {
            return Err(ConfigError::TileOutOfGrid {
                zoom,
                col,
                row,
                size: size as u64,
            });
        }
        Ok(Self { zoom, row, col })
    }

    /// Build an address the caller has already bounds-checked.
    #[inline]
    pub(crate) fn from_parts(zoom: u8, col: u32, row: u32) -> Self {
        debug_assert!(zoom <= MAX_ZOOM && col < grid_size(zoom) && row < grid_size(zoom));
        Self { zoom, row, col }
    }

    /// Zoom level.
    #[inline]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// X coordinate (east-west), 0 at west.
    #[inline]
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Y coordinate (north-south), 0 at north.
    #[inline]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Position of this tile in a whole-world pyramid walk.
    ///
    /// Tiles of lower zoom levels come first (`(4^z - 1) / 3` of them),
    /// then rows, then columns. Unique for every address, so it doubles as
    /// a stable per-tile identifier.
    pub fn pyramid_index(&self) -> u64 {
        let preceding = ((1u64 << (2 * self.zoom as u32)) - 1) / 3;
        preceding + self.row as u64 * grid_size(self.zoom) as u64 + self.col as u64
    }

    /// Microsoft quadtree key for this tile. Zoom 0 yields the empty key.
    pub fn quadkey(&self) -> String {
        (1..=self.zoom)
            .rev()
            .map(|level| {
                let mask = 1u32 << (level - 1);
                let mut digit = b'0';
                if self.col & mask != 0 {
                    digit += 1;
                }
                if self.row & mask != 0 {
                    digit += 2;
                }
                digit as char
            })
            .collect()
    }

    /// Parse a Microsoft quadtree key.
    pub fn from_quadkey(key: &str) -> Result<Self, ConfigError> {
        if key.len() > MAX_ZOOM as usize {
            return Err(ConfigError::InvalidQuadkey(key.to_string()));
        }
        let mut col = 0u32;
        let mut row = 0u32;
        for c in key.chars() {
            col <<= 1;
            row <<= 1;
            match c {
                '0' => {}
                '1' => col |= 1,
                '2' => row |= 1,
                '3' => {
                    col |= 1;
                    row |= 1;
                }
                _ => return Err(ConfigError::InvalidQuadkey(key.to_string())),
            }
        }
        Ok(Self::from_parts(key.len() as u8, col, row))
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Grid dimension at a validated zoom level.
#[inline]
pub(crate) fn grid_size(zoom: u8) -> u32 {
    1u32 << zoom
}

/// Integer position inside a tile's local coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LocalPoint {
    pub x: i32,
    pub y: i32,
}

impl LocalPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if both coordinates lie in `[0, extent)`.
    #[inline]
    pub fn within(&self, extent: u32) -> bool {
        let extent = extent as i64;
        (0..extent).contains(&(self.x as i64)) && (0..extent).contains(&(self.y as i64))
    }
}

/// Inclusive column/row range of tiles at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub zoom: u8,
    pub min_col: u32,
    pub max_col: u32,
    pub min_row: u32,
    pub max_row: u32,
}

// A range always holds at least one tile.
#[allow(clippy::len_without_is_empty)]
impl TileRange {
    /// Number of tiles in the range.
    pub fn len(&self) -> u64 {
        (self.max_col - self.min_col + 1) as u64 * (self.max_row - self.min_row + 1) as u64
    }

    pub fn contains(&self, tile: &TileAddress) -> bool {
        tile.zoom == self.zoom
            && (self.min_col..=self.max_col).contains(&tile.col)
            && (self.min_row..=self.max_row).contains(&tile.row)
    }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Validated bounding box. Latitudes are limited to the Web Mercator range.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, ConfigError> {
        for lon in [min_lon, max_lon] {
            if !(MIN_LON..=MAX_LON).contains(&lon) {
                return Err(ConfigError::InvalidLongitude(lon));
            }
        }
        for lat in [min_lat, max_lat] {
            if !(MIN_LAT..=MAX_LAT).contains(&lat) {
                return Err(ConfigError::InvalidLatitude(lat));
            }
        }
        if min_lon > max_lon || min_lat > max_lat {
            return Err(ConfigError::InvalidBounds {
                input: format!("{},{},{},{}", min_lon, min_lat, max_lon, max_lat),
                reason: "minimum must not exceed maximum".to_string(),
            });
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// The whole Web Mercator world.
    pub fn world() -> Self {
        Self {
            min_lon: MIN_LON,
            min_lat: MIN_LAT,
            max_lon: MAX_LON,
            max_lat: MAX_LAT,
        }
    }

    pub fn is_world(&self) -> bool {
        *self == Self::world()
    }

    /// As `[min_lon, min_lat, max_lon, max_lat]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::world()
    }
}

impl FromStr for Bounds {
    type Err = ConfigError;

    /// Parse `minlon,minlat,maxlon,maxlat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidBounds {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid("expected four comma-separated numbers"))?;
        match parts.as_slice() {
            [min_lon, min_lat, max_lon, max_lat] => {
                Bounds::new(*min_lon, *min_lat, *max_lon, *max_lat)
            }
            _ => Err(invalid("expected minlon,minlat,maxlon,maxlat")),
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
