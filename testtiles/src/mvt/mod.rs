//! Mapbox Vector Tile (version 2) encoding.
//!
//! The protobuf payload is written by the `mvt` crate. This module maps the
//! generator's [`Tile`](crate::tile::Tile) model onto it and rejects tiles
//! that a conformant reader would misinterpret:
//!
//! ```text
//! Tile
//!  └── layers           one shared extent per tile
//!       └── features    type POINT, id = `id` property
//!            ├── tags   one per property, keys unique per feature
//!            └── geometry  MoveTo(1) at (x, y) in [0, extent)
//! ```

mod encoder;

pub use encoder::{encode, validate, TileEncoder};

/// Layer version written by the encoder.
pub const VECTOR_TILE_VERSION: u32 = 2;

/// Extent given to the writer when a tile has no layers.
pub const DEFAULT_EXTENT: u32 = 4096;
