//! Coordinate conversion module
//!
//! Converts between geographic coordinates (latitude/longitude), Web
//! Mercator tile addresses and tile-local integer coordinates at a fixed
//! extent.

mod types;

pub use types::{
    Bounds, LocalPoint, TileAddress, TileRange, DEFAULT_EXTENT, MAX_LAT, MAX_LON, MAX_ZOOM,
    MIN_LAT, MIN_LON, MIN_ZOOM,
};
pub(crate) use types::grid_size;

use rand::Rng;
use std::f64::consts::PI;

use crate::error::ConfigError;

/// Check a caller-supplied zoom level.
pub fn validate_zoom(zoom: i64) -> Result<u8, ConfigError> {
    if !(MIN_ZOOM as i64..=MAX_ZOOM as i64).contains(&zoom) {
        return Err(ConfigError::InvalidZoom(zoom));
    }
    Ok(zoom as u8)
}

/// Grid dimension (tiles per row and per column) at a zoom level: `2^zoom`.
pub fn tile_count(zoom: i64) -> Result<u64, ConfigError> {
    let zoom = validate_zoom(zoom)?;
    Ok(grid_size(zoom) as u64)
}

/// Check a tile extent: it must be positive and fit the signed geometry
/// parameters of the encoding.
pub fn validate_extent(extent: u32) -> Result<u32, ConfigError> {
    if extent == 0 || extent > i32::MAX as u32 {
        return Err(ConfigError::InvalidExtent(extent));
    }
    Ok(extent)
}

/// Uniformly distributed point in `[0, extent)` on both axes.
///
/// Fails with [`ConfigError::InvalidExtent`] instead of adjusting an
/// unusable extent.
pub fn random_local_point<R: Rng + ?Sized>(
    rng: &mut R,
    extent: u32,
) -> Result<LocalPoint, ConfigError> {
    let extent = validate_extent(extent)?;
    Ok(sample_local_point(rng, extent))
}

/// Caller guarantees `extent` passed [`validate_extent`].
#[inline]
pub(crate) fn sample_local_point<R: Rng + ?Sized>(rng: &mut R, extent: u32) -> LocalPoint {
    let upper = extent as i32;
    let x = rng.gen_range(0..upper);
    let y = rng.gen_range(0..upper);
    LocalPoint { x, y }
}

fn validate_lat_lon(lat: f64, lon: f64) -> Result<(), ConfigError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(ConfigError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(ConfigError::InvalidLongitude(lon));
    }
    Ok(())
}

/// Fractional world position of a coordinate, in tiles at `zoom`.
fn fractional_tile(lat: f64, lon: f64, zoom: u8) -> (f64, f64) {
    let n = grid_size(zoom) as f64;
    let x = (lon + 180.0) / 360.0 * n;
    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n;
    (x, y)
}

/// Converts geographic coordinates to the tile containing them.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 24)
///
/// Points on the east or south edge of the world map to the last column
/// or row rather than one past it.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileAddress, ConfigError> {
    validate_lat_lon(lat, lon)?;
    let zoom = validate_zoom(zoom as i64)?;

    let last = grid_size(zoom) - 1;
    let (x, y) = fractional_tile(lat, lon, zoom);
    let col = (x.floor().max(0.0) as u32).min(last);
    let row = (y.floor().max(0.0) as u32).min(last);

    Ok(TileAddress::from_parts(zoom, col, row))
}

/// Converts geographic coordinates to a tile plus the local offset inside it.
///
/// The offset is the fractional part of the tile position scaled linearly
/// over `[0, extent)`.
pub fn to_local_coords(
    lat: f64,
    lon: f64,
    zoom: u8,
    extent: u32,
) -> Result<(TileAddress, LocalPoint), ConfigError> {
    let extent = validate_extent(extent)?;
    let tile = to_tile_coords(lat, lon, zoom)?;
    let (x, y) = fractional_tile(lat, lon, tile.zoom());

    let last = extent as i32 - 1;
    let local = |frac: f64, base: u32| -> i32 {
        let offset = ((frac - base as f64) * extent as f64).floor();
        (offset.max(0.0) as i64).min(last as i64) as i32
    };

    Ok((
        tile,
        LocalPoint {
            x: local(x, tile.col()),
            y: local(y, tile.row()),
        },
    ))
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileAddress) -> (f64, f64) {
    unproject(tile.col() as f64, tile.row() as f64, tile.zoom())
}

/// Geographic position of a tile-local point.
pub fn local_to_lat_lon(tile: &TileAddress, point: LocalPoint, extent: u32) -> (f64, f64) {
    let extent = extent.max(1) as f64;
    unproject(
        tile.col() as f64 + point.x as f64 / extent,
        tile.row() as f64 + point.y as f64 / extent,
        tile.zoom(),
    )
}

fn unproject(x: f64, y: f64, zoom: u8) -> (f64, f64) {
    let n = grid_size(zoom) as f64;

    let lon = x / n * 360.0 - 180.0;

    let lat_rad = (PI * (1.0 - 2.0 * y / n)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

/// Tiles at `zoom` that cover `bounds`.
pub fn tile_range(bounds: &Bounds, zoom: u8) -> Result<TileRange, ConfigError> {
    let north_west = to_tile_coords(bounds.max_lat, bounds.min_lon, zoom)?;
    let south_east = to_tile_coords(bounds.min_lat, bounds.max_lon, zoom)?;
    Ok(TileRange {
        zoom,
        min_col: north_west.col(),
        max_col: south_east.col(),
        min_row: north_west.row(),
        max_row: south_east.row(),
    })
}

#[cfg(test)]
mod tests;
