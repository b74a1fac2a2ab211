//! testtiles - synthetic vector tile pyramids
//!
//! Generates a full Web Mercator tile pyramid of Mapbox Vector Tiles
//! filled with randomly placed points, for exercising tile servers,
//! renderers and map clients without real data.
//!
//! # High-Level API
//!
//! ```ignore
//! use testtiles::generator::{TilesetConfig, TilesetGenerator};
//! use testtiles::output::{DirectoryWriter, TileFormat};
//!
//! let config = TilesetConfig::new(4, 100).with_seed(42);
//! let generator = TilesetGenerator::new(&config)?;
//! let writer = DirectoryWriter::new("tiles", TileFormat::Pbf)?;
//! let summary = generator.run(&writer, None)?;
//! ```
//!
//! Each zoom level `z` holds `4^z` tiles, so the total grows quickly:
//! zoom 10 alone is over a million tiles.

pub mod coord;
pub mod error;
pub mod generator;
pub mod logging;
pub mod mvt;
pub mod output;
pub mod pyramid;
pub mod synth;
pub mod tile;

pub use error::{ConfigError, GenerateError, ValidationError};
pub use generator::{EncodedTile, RunSummary, TilesetConfig, TilesetGenerator};

/// Version of the testtiles library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
