//! Tests for coordinate conversion

use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_tile_count_is_power_of_two() {
    for zoom in 0..=MAX_ZOOM as i64 {
        assert_eq!(tile_count(zoom).unwrap(), 1u64 << zoom, "zoom {}", zoom);
    }
}

#[test]
fn test_tile_count_rejects_negative_zoom() {
    assert_eq!(tile_count(-1), Err(ConfigError::InvalidZoom(-1)));
}

#[test]
fn test_tile_count_rejects_zoom_above_max() {
    assert!(matches!(
        tile_count(MAX_ZOOM as i64 + 1),
        Err(ConfigError::InvalidZoom(_))
    ));
}

#[test]
fn test_random_local_point_within_extent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let p = random_local_point(&mut rng, DEFAULT_EXTENT).unwrap();
        assert!(p.within(DEFAULT_EXTENT), "{:?} escaped extent", p);
    }
}

#[test]
fn test_random_local_point_small_extent() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let p = random_local_point(&mut rng, 1).unwrap();
        assert_eq!(p, LocalPoint::new(0, 0));
    }
}

#[test]
fn test_random_local_point_rejects_unusable_extent() {
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(
        random_local_point(&mut rng, 0),
        Err(ConfigError::InvalidExtent(0))
    );
    let too_large = i32::MAX as u32 + 1;
    assert_eq!(
        random_local_point(&mut rng, too_large),
        Err(ConfigError::InvalidExtent(too_large))
    );
}

#[test]
fn test_validate_extent_bounds() {
    assert_eq!(validate_extent(1), Ok(1));
    assert_eq!(validate_extent(i32::MAX as u32), Ok(i32::MAX as u32));
    assert_eq!(validate_extent(0), Err(ConfigError::InvalidExtent(0)));
}

#[test]
fn test_random_local_point_is_reproducible() {
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let first: Vec<_> = (0..32).map(|_| random_local_point(&mut a, 4096).unwrap()).collect();
    let second: Vec<_> = (0..32).map(|_| random_local_point(&mut b, 4096).unwrap()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_new_york_city_at_zoom_16() {
    // New York City: 40.7128°N, 74.0060°W
    let tile = to_tile_coords(40.7128, -74.0060, 16).unwrap();
    assert_eq!(tile.row(), 24640);
    assert_eq!(tile.col(), 19295);
    assert_eq!(tile.zoom(), 16);
}

#[test]
fn test_london_at_zoom_10() {
    let tile = to_tile_coords(51.5074, -0.1278, 10).unwrap();
    assert_eq!(tile.row(), 340);
    assert_eq!(tile.col(), 511);
}

#[test]
fn test_equator_prime_meridian() {
    // At zoom 1 the origin sits on the corner shared by all four tiles
    let tile = to_tile_coords(0.0, 0.0, 1).unwrap();
    assert_eq!((tile.col(), tile.row()), (1, 1));
}

#[test]
fn test_world_corners_stay_in_grid() {
    let nw = to_tile_coords(MAX_LAT, MIN_LON, 3).unwrap();
    assert_eq!((nw.col(), nw.row()), (0, 0));

    let se = to_tile_coords(MIN_LAT, MAX_LON, 3).unwrap();
    assert_eq!((se.col(), se.row()), (7, 7));
}

#[test]
fn test_invalid_latitude() {
    assert!(matches!(
        to_tile_coords(90.0, 0.0, 10),
        Err(ConfigError::InvalidLatitude(_))
    ));
    assert!(matches!(
        to_tile_coords(-90.0, 0.0, 10),
        Err(ConfigError::InvalidLatitude(_))
    ));
}

#[test]
fn test_invalid_longitude() {
    assert!(matches!(
        to_tile_coords(0.0, 181.0, 10),
        Err(ConfigError::InvalidLongitude(_))
    ));
    assert!(matches!(
        to_tile_coords(0.0, -181.0, 10),
        Err(ConfigError::InvalidLongitude(_))
    ));
}

#[test]
fn test_invalid_zoom_too_high() {
    assert!(matches!(
        to_tile_coords(0.0, 0.0, MAX_ZOOM + 1),
        Err(ConfigError::InvalidZoom(_))
    ));
}

#[test]
fn test_local_coords_london() {
    let (tile, local) = to_local_coords(51.5074, -0.1278, 10, 4096).unwrap();
    assert_eq!((tile.col(), tile.row()), (511, 340));
    assert_eq!(local, LocalPoint::new(2607, 2073));
}

#[test]
fn test_local_coords_within_extent_at_world_edges() {
    for (lat, lon) in [(MAX_LAT, MIN_LON), (MIN_LAT, MAX_LON), (0.0, 0.0)] {
        for zoom in [0, 1, 5, 12] {
            let (_, local) = to_local_coords(lat, lon, zoom, 4096).unwrap();
            assert!(local.within(4096), "({}, {}) z{} -> {:?}", lat, lon, zoom, local);
        }
    }
}

#[test]
fn test_local_coords_rejects_zero_extent() {
    assert_eq!(
        to_local_coords(0.0, 0.0, 1, 0),
        Err(ConfigError::InvalidExtent(0))
    );
}

#[test]
fn test_local_roundtrip() {
    let lat = 48.8566; // Paris
    let lon = 2.3522;
    let (tile, local) = to_local_coords(lat, lon, 12, 4096).unwrap();
    let (back_lat, back_lon) = local_to_lat_lon(&tile, local, 4096);

    // One local unit at zoom 12 is far below 0.001 degrees
    assert!((back_lat - lat).abs() < 0.001);
    assert!((back_lon - lon).abs() < 0.001);
}

#[test]
fn test_tile_to_lat_lon_northwest_corner() {
    let tile = TileAddress::new(0, 0, 0).unwrap();
    let (lat, lon) = tile_to_lat_lon(&tile);
    assert!((lat - MAX_LAT).abs() < 1e-6);
    assert_eq!(lon, -180.0);
}

#[test]
fn test_roundtrip_at_different_zooms() {
    let lat = 51.5074; // London
    let lon = -0.1278;

    for zoom in [0, 5, 10, 15, 18, 24] {
        let tile = to_tile_coords(lat, lon, zoom).unwrap();
        let (converted_lat, converted_lon) = tile_to_lat_lon(&tile);

        // tile_to_lat_lon returns the northwest corner, so allow one tile
        let tile_size_degrees = 360.0 / (2.0_f64.powi(zoom as i32));

        assert!(
            (converted_lat - lat).abs() < tile_size_degrees,
            "Zoom {}: lat diff {} exceeds tile size {}",
            zoom,
            (converted_lat - lat).abs(),
            tile_size_degrees
        );
        assert!(
            (converted_lon - lon).abs() < tile_size_degrees,
            "Zoom {}: lon diff {} exceeds tile size {}",
            zoom,
            (converted_lon - lon).abs(),
            tile_size_degrees
        );
    }
}

#[test]
fn test_tile_address_rejects_out_of_grid() {
    assert!(TileAddress::new(1, 1, 1).is_ok());
    assert_eq!(
        TileAddress::new(1, 2, 0),
        Err(ConfigError::TileOutOfGrid {
            zoom: 1,
            col: 2,
            row: 0,
            size: 2
        })
    );
    assert!(matches!(
        TileAddress::new(MAX_ZOOM + 1, 0, 0),
        Err(ConfigError::InvalidZoom(_))
    ));
}

#[test]
fn test_tile_address_ordering_is_zoom_row_col() {
    let a = TileAddress::new(1, 1, 0).unwrap();
    let b = TileAddress::new(1, 0, 1).unwrap();
    let c = TileAddress::new(0, 0, 0).unwrap();
    let mut tiles = vec![b, a, c];
    tiles.sort();
    assert_eq!(tiles, vec![c, a, b]);
}

#[test]
fn test_pyramid_index() {
    let index = |z, c, r| TileAddress::new(z, c, r).unwrap().pyramid_index();
    assert_eq!(index(0, 0, 0), 0);
    assert_eq!(index(1, 0, 0), 1);
    assert_eq!(index(1, 1, 0), 2);
    assert_eq!(index(1, 0, 1), 3);
    assert_eq!(index(1, 1, 1), 4);
    assert_eq!(index(2, 0, 0), 5);
    assert_eq!(index(2, 3, 3), 20);
}

#[test]
fn test_quadkey_known_values() {
    // Example from the Bing Maps tile system documentation
    let tile = TileAddress::new(3, 3, 5).unwrap();
    assert_eq!(tile.quadkey(), "213");
    assert_eq!(TileAddress::new(0, 0, 0).unwrap().quadkey(), "");
}

#[test]
fn test_quadkey_roundtrip() {
    let tile = TileAddress::new(16, 19295, 24640).unwrap();
    assert_eq!(TileAddress::from_quadkey(&tile.quadkey()).unwrap(), tile);
}

#[test]
fn test_invalid_quadkey() {
    assert!(matches!(
        TileAddress::from_quadkey("0124"),
        Err(ConfigError::InvalidQuadkey(_))
    ));
    let too_long = "0".repeat(MAX_ZOOM as usize + 1);
    assert!(matches!(
        TileAddress::from_quadkey(&too_long),
        Err(ConfigError::InvalidQuadkey(_))
    ));
}

#[test]
fn test_tile_address_display() {
    let tile = TileAddress::new(4, 3, 9).unwrap();
    assert_eq!(tile.to_string(), "4/3/9");
}

#[test]
fn test_bounds_parse() {
    let bounds: Bounds = "-10.5, 35, 30, 60".parse().unwrap();
    assert_eq!(bounds.to_array(), [-10.5, 35.0, 30.0, 60.0]);
}

#[test]
fn test_bounds_parse_rejects_wrong_arity() {
    assert!(matches!(
        "1,2,3".parse::<Bounds>(),
        Err(ConfigError::InvalidBounds { .. })
    ));
    assert!(matches!(
        "a,b,c,d".parse::<Bounds>(),
        Err(ConfigError::InvalidBounds { .. })
    ));
}

#[test]
fn test_bounds_rejects_inverted_box() {
    assert!(matches!(
        Bounds::new(10.0, 0.0, -10.0, 5.0),
        Err(ConfigError::InvalidBounds { .. })
    ));
    assert!(matches!(
        Bounds::new(0.0, -89.0, 1.0, 1.0),
        Err(ConfigError::InvalidLatitude(_))
    ));
}

#[test]
fn test_world_tile_range_covers_grid() {
    for zoom in [0u8, 1, 4, 10] {
        let range = tile_range(&Bounds::world(), zoom).unwrap();
        let last = (1u32 << zoom) - 1;
        assert_eq!((range.min_col, range.max_col), (0, last));
        assert_eq!((range.min_row, range.max_row), (0, last));
        assert_eq!(range.len(), 1u64 << (2 * zoom as u32));
    }
}

#[test]
fn test_degenerate_bounds_still_cover_one_tile() {
    let point = Bounds::new(13.4, 52.5, 13.4, 52.5).unwrap();
    for zoom in [0u8, 8, 18] {
        let range = tile_range(&point, zoom).unwrap();
        assert_eq!(range.len(), 1, "zoom {}", zoom);
    }
}

#[test]
fn test_bounded_tile_range() {
    // Northern Europe at zoom 2 sits in the top half, columns 1..2
    let bounds = Bounds::new(-10.0, 40.0, 30.0, 70.0).unwrap();
    let range = tile_range(&bounds, 2).unwrap();
    assert_eq!((range.min_col, range.max_col), (1, 2));
    assert_eq!((range.min_row, range.max_row), (0, 1));
    assert!(range.contains(&TileAddress::new(2, 2, 1).unwrap()));
    assert!(!range.contains(&TileAddress::new(2, 3, 1).unwrap()));
}
