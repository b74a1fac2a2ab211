//! Tileset generation pipeline.
//!
//! Ties the pieces together: the pyramid drives iteration, the
//! synthesizer fills each tile, the encoder serializes it and a
//! [`TileSink`] persists the payload.
//!
//! ```text
//! TilePyramid ──► TileAddress ──► PointSynthesizer ──► Tile
//!                                                       │
//!                  TileSink ◄── EncodedTile ◄── TileEncoder
//! ```
//!
//! Every tile gets its own random source derived from the run seed and
//! the tile's pyramid index. Tiles share nothing, so a run produces the
//! same bytes whether it uses one thread or many.

mod config;
mod progress;

pub use config::{TilesetConfig, DEFAULT_COUNT, DEFAULT_LAYER_NAME, DEFAULT_MAX_ZOOM};
pub use progress::{GenerationProgress, ProgressCallback};

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::coord::TileAddress;
use crate::error::{ConfigError, GenerateError, ValidationError};
use crate::mvt::TileEncoder;
use crate::output::TileSink;
use crate::pyramid::{TilePyramid, LARGE_PYRAMID_TILES};
use crate::synth::{validate_count, PointSynthesizer, PropertyProfile, TemporalRange};
use crate::tile::{Layer, Tile};

/// One tile's finished payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTile {
    pub address: TileAddress,
    pub data: Bytes,
    /// Features across all layers.
    pub features: usize,
}

/// Totals for a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub tiles: u64,
    pub features: u64,
    pub bytes: u64,
    /// Seed that reproduces this run.
    pub seed: u64,
    pub elapsed: Duration,
}

/// Derive a tile's seed from the run seed.
///
/// SplitMix64 finalizer over the seed offset by the pyramid index, so
/// neighbouring tiles get unrelated streams.
pub fn tile_seed(seed: u64, address: &TileAddress) -> u64 {
    let mut z = seed.wrapping_add(address.pyramid_index().wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Vessel `seriesgroup` of the points in a tile: the pyramid index
/// counted from 1, so every tile is one vessel.
pub fn series_group(address: &TileAddress) -> u64 {
    address.pyramid_index() + 1
}

#[derive(Default)]
struct RunCounters {
    tiles: AtomicU64,
    features: AtomicU64,
    bytes: AtomicU64,
}

/// Generates every tile of a configured pyramid.
#[derive(Debug, Clone)]
pub struct TilesetGenerator {
    pyramid: TilePyramid,
    synthesizer: PointSynthesizer,
    encoder: TileEncoder,
    count: usize,
    layer_name: String,
    seed: u64,
    threads: usize,
}

impl TilesetGenerator {
    /// Validate `config` and prepare a generator. Fails before any tile
    /// is produced.
    pub fn new(config: &TilesetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let count = validate_count(config.count)?;
        let pyramid = TilePyramid::with_bounds(config.max_zoom, config.bounds)?;
        let synthesizer = PointSynthesizer::new(config.extent)?
            .with_profile(config.profile)
            .with_temporal(config.temporal);
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            pyramid,
            synthesizer,
            encoder: TileEncoder::new(),
            count,
            layer_name: config.layer_name.clone(),
            seed,
            threads: config.threads,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pyramid(&self) -> &TilePyramid {
        &self.pyramid
    }

    pub fn total_tiles(&self) -> u64 {
        self.pyramid.total_tiles()
    }

    /// Points per tile.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn extent(&self) -> u32 {
        self.synthesizer.extent()
    }

    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    pub fn profile(&self) -> PropertyProfile {
        self.synthesizer.profile()
    }

    pub fn temporal(&self) -> TemporalRange {
        self.synthesizer.temporal()
    }

    /// The random source this run uses for `address`.
    pub fn tile_rng(&self, address: &TileAddress) -> StdRng {
        StdRng::seed_from_u64(tile_seed(self.seed, address))
    }

    /// Synthesize a tile's features from the given random source.
    pub fn build_tile<R: Rng + ?Sized>(&self, address: TileAddress, rng: &mut R) -> Tile {
        let features = self
            .synthesizer
            .with_series_group(series_group(&address))
            .generate(self.count, rng);
        let layer = Layer::new(self.layer_name.as_str())
            .with_extent(self.synthesizer.extent())
            .with_features(features);
        Tile::new(address).with_layer(layer)
    }

    /// Build and encode a tile from the given random source.
    pub fn generate_tile_with<R: Rng + ?Sized>(
        &self,
        address: TileAddress,
        rng: &mut R,
    ) -> Result<EncodedTile, ValidationError> {
        let tile = self.build_tile(address, rng);
        let data = self.encoder.encode(&tile)?;
        Ok(EncodedTile {
            address,
            data,
            features: tile.feature_count(),
        })
    }

    /// Build and encode a tile from its derived random source.
    pub fn generate_tile(&self, address: TileAddress) -> Result<EncodedTile, ValidationError> {
        let mut rng = self.tile_rng(&address);
        self.generate_tile_with(address, &mut rng)
    }

    /// Lazily generate every tile in pyramid order, each from its derived
    /// random source.
    pub fn tiles(&self) -> impl Iterator<Item = Result<EncodedTile, ValidationError>> + '_ {
        self.pyramid
            .iter()
            .map(move |address| self.generate_tile(address))
    }

    /// Lazily generate every tile in pyramid order, drawing all points
    /// from one caller-owned random source.
    pub fn tiles_with<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
    ) -> impl Iterator<Item = Result<EncodedTile, ValidationError>> + 'a {
        self.pyramid
            .iter()
            .map(move |address| self.generate_tile_with(address, &mut *rng))
    }

    /// Generate the whole pyramid into `sink`.
    ///
    /// The first error aborts the run. Tiles already handed to the sink
    /// stay written; no partial tile is ever handed over.
    pub fn run<S: TileSink + ?Sized>(
        &self,
        sink: &S,
        progress: Option<&ProgressCallback>,
    ) -> Result<RunSummary, GenerateError> {
        let total = self.total_tiles();
        info!(
            max_zoom = self.pyramid.max_zoom(),
            count = self.count,
            tiles = total,
            seed = self.seed,
            threads = self.threads,
            profile = %self.profile(),
            "Generating tileset"
        );
        if total > LARGE_PYRAMID_TILES {
            warn!(
                tiles = total,
                max_zoom = self.pyramid.max_zoom(),
                "Tile count grows as 4^zoom; this run is very large"
            );
        }

        let start = Instant::now();
        let counters = RunCounters::default();

        if self.threads <= 1 {
            self.run_sequential(sink, &counters, progress)?;
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()?;
            pool.install(|| {
                self.pyramid
                    .iter()
                    .par_bridge()
                    .try_for_each(|address| self.process(address, sink, &counters, progress))
            })?;
        }

        let summary = RunSummary {
            tiles: counters.tiles.load(Ordering::Relaxed),
            features: counters.features.load(Ordering::Relaxed),
            bytes: counters.bytes.load(Ordering::Relaxed),
            seed: self.seed,
            elapsed: start.elapsed(),
        };
        info!(
            tiles = summary.tiles,
            features = summary.features,
            bytes = summary.bytes,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Tileset complete"
        );
        Ok(summary)
    }

    fn run_sequential<S: TileSink + ?Sized>(
        &self,
        sink: &S,
        counters: &RunCounters,
        progress: Option<&ProgressCallback>,
    ) -> Result<(), GenerateError> {
        let mut zoom = 0u8;
        for address in self.pyramid.iter() {
            if address.zoom() != zoom {
                info!(zoom, tiles = self.pyramid.level_count(zoom), "Zoom level complete");
                zoom = address.zoom();
            }
            self.process(address, sink, counters, progress)?;
        }
        info!(zoom, tiles = self.pyramid.level_count(zoom), "Zoom level complete");
        Ok(())
    }

    fn process<S: TileSink + ?Sized>(
        &self,
        address: TileAddress,
        sink: &S,
        counters: &RunCounters,
        progress: Option<&ProgressCallback>,
    ) -> Result<(), GenerateError> {
        let tile = self.generate_tile(address)?;
        sink.write_tile(&tile)?;

        debug!(
            zoom = address.zoom(),
            col = address.col(),
            row = address.row(),
            bytes = tile.data.len(),
            "Wrote tile"
        );

        counters
            .features
            .fetch_add(tile.features as u64, Ordering::Relaxed);
        counters
            .bytes
            .fetch_add(tile.data.len() as u64, Ordering::Relaxed);
        let done = counters.tiles.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some(callback) = progress {
            callback(GenerationProgress {
                tiles_done: done,
                tiles_total: self.total_tiles(),
                zoom: address.zoom(),
            });
        }
        Ok(())
    }
}
