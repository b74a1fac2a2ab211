//! Generate command: write a synthetic tile pyramid to disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use testtiles::coord::Bounds;
use testtiles::error::ConfigError;
use testtiles::generator::{
    GenerationProgress, ProgressCallback, RunSummary, TilesetConfig, TilesetGenerator,
};
use testtiles::output::{DirectoryWriter, TileFormat, TilesetHeader};
use testtiles::pyramid::LARGE_PYRAMID_TILES;
use testtiles::synth::{PropertyProfile, TemporalRange, DATE_FORMAT, DEFAULT_TEMPORAL_EXTENT_MS};
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub outdir: PathBuf,
    pub max_zoom: i64,
    pub count: i64,
    pub extent: u32,
    pub layer: String,
    pub seed: Option<u64>,
    pub bounds: Option<String>,
    pub profile: PropertyProfile,
    pub temporal_start: Option<String>,
    pub temporal_extent: Option<f64>,
    pub temporal_extent_count: Option<usize>,
    pub format: TileFormat,
    pub threads: usize,
    pub no_header: bool,
    pub verbose: bool,
    pub log_dir: PathBuf,
}

impl GenerateArgs {
    /// Build the library configuration. Nothing is written yet.
    pub fn to_config(&self) -> Result<TilesetConfig, CliError> {
        let bounds = match &self.bounds {
            Some(text) => text.parse::<Bounds>()?,
            None => Bounds::world(),
        };
        let temporal = self.temporal_range()?;

        let mut config = TilesetConfig::new(self.max_zoom, self.count)
            .with_extent(self.extent)
            .with_layer_name(self.layer.clone())
            .with_bounds(bounds)
            .with_profile(self.profile)
            .with_temporal(temporal)
            .with_threads(self.threads);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }

    /// Time windows to generate, one tileset each. `None` means a single
    /// tileset spread over the whole range.
    pub fn time_slices(&self, config: &TilesetConfig) -> Result<Option<Vec<Slice>>, CliError> {
        let Some(count) = self.temporal_extent_count else {
            return Ok(None);
        };
        let slices = config
            .temporal
            .slices(count)?
            .into_iter()
            .map(|temporal| -> Result<Slice, CliError> {
                let label = temporal
                    .label()
                    .ok_or(ConfigError::InvalidTemporalExtent(temporal.extent_ms()))?;
                Ok(Slice {
                    dir: self.outdir.join(label),
                    temporal,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(slices))
    }

    fn temporal_range(&self) -> Result<TemporalRange, CliError> {
        let extent_ms = self.temporal_extent.unwrap_or(DEFAULT_TEMPORAL_EXTENT_MS);
        let range = match &self.temporal_start {
            Some(text) => {
                let start = NaiveDateTime::parse_from_str(text, DATE_FORMAT).map_err(|source| {
                    CliError::InvalidTimestamp {
                        input: text.clone(),
                        source,
                    }
                })?;
                TemporalRange::starting_at(start.and_utc(), extent_ms)?
            }
            None => TemporalRange::new(0.0, extent_ms)?,
        };
        Ok(range)
    }
}

/// One time slice and the directory its tileset goes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub dir: PathBuf,
    pub temporal: TemporalRange,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> Result<(), CliError> {
    // Validate before touching the filesystem.
    let config = args.to_config()?;
    let slices = args.time_slices(&config)?;
    let generator = TilesetGenerator::new(&config)?;

    let runner = CliRunner::new(&args.log_dir, args.verbose)?;
    runner.log_startup("generate");

    let total = generator.total_tiles() * slices.as_ref().map_or(1, |s| s.len() as u64);
    println!("Generating tileset:");
    println!("  Output:    {}", args.outdir.display());
    println!("  Zoom:      0-{}", generator.pyramid().max_zoom());
    println!("  Tiles:     {}", total);
    println!("  Points:    {} per tile", generator.count());
    println!("  Profile:   {}", generator.profile());
    if let Some(slices) = &slices {
        println!("  Slices:    {}", slices.len());
    }
    println!("  Seed:      {}", generator.seed());
    if total > LARGE_PYRAMID_TILES {
        eprintln!(
            "Warning: {} tiles requested; this may take a long time and a lot of disk",
            total
        );
    }
    println!();

    let name = tileset_name(&args.outdir);
    let summary = match slices {
        None => {
            let header = TilesetHeader::for_generator(name, &generator);
            write_tileset(&generator, &args.outdir, args.format, header, !args.no_header)?
        }
        Some(slices) => {
            let mut totals = RunSummary {
                tiles: 0,
                features: 0,
                bytes: 0,
                seed: generator.seed(),
                elapsed: Duration::ZERO,
            };
            for slice in &slices {
                // Every slice reuses the run seed; only the time window moves.
                let slice_config = config
                    .clone()
                    .with_seed(generator.seed())
                    .with_temporal(slice.temporal);
                let slice_generator = TilesetGenerator::new(&slice_config)?;
                println!("Slice {}:", slice.dir.display());
                let header = TilesetHeader::for_generator(name.clone(), &slice_generator)
                    .with_temporal_extents();
                let summary = write_tileset(
                    &slice_generator,
                    &slice.dir,
                    args.format,
                    header,
                    !args.no_header,
                )?;
                totals.tiles += summary.tiles;
                totals.features += summary.features;
                totals.bytes += summary.bytes;
                totals.elapsed += summary.elapsed;
            }
            if !args.no_header {
                let overall = config.temporal.spanning(slices.len())?;
                let mut header = TilesetHeader::for_generator(name, &generator)
                    .with_time_range(&overall)
                    .with_temporal_extents();
                if generator.profile() == PropertyProfile::Vessel {
                    header = header.with_series_tilesets();
                }
                let path = DirectoryWriter::new(&args.outdir, args.format)?.write_header(&header)?;
                info!(path = %path.display(), slices = slices.len(), "Header written");
            }
            totals
        }
    };

    println!();
    println!(
        "✓ Wrote {} tiles ({} features, {:.2} MB) in {:.1}s",
        summary.tiles,
        summary.features,
        summary.bytes as f64 / 1_048_576.0,
        summary.elapsed.as_secs_f64()
    );
    println!("  Reproduce with --seed {}", summary.seed);

    Ok(())
}

/// Generate one complete tileset into `outdir`. Vessel runs also get a
/// tileset per series group.
fn write_tileset(
    generator: &TilesetGenerator,
    outdir: &Path,
    format: TileFormat,
    header: TilesetHeader,
    with_header: bool,
) -> Result<RunSummary, CliError> {
    let mut writer = DirectoryWriter::new(outdir, format)?;
    if generator.profile() == PropertyProfile::Vessel {
        writer = writer.with_series_tilesets(header.clone());
    }

    let progress = progress_printer();
    let summary = generator.run(&writer, Some(&progress))?;

    if with_header {
        let header = if writer.writes_series_tilesets() {
            header.with_series_tilesets()
        } else {
            header
        };
        let path = writer.write_header(&header)?;
        info!(path = %path.display(), "Header written");
    }
    Ok(summary)
}

/// Prints a line every time another tenth of the run completes.
fn progress_printer() -> ProgressCallback {
    let last_decile = Arc::new(AtomicU64::new(0));
    Arc::new(move |progress: GenerationProgress| {
        let decile = (progress.fraction() * 10.0).floor() as u64;
        if decile > last_decile.fetch_max(decile, Ordering::Relaxed) {
            println!(
                "  {:>3}%  {}/{} tiles",
                decile * 10,
                progress.tiles_done,
                progress.tiles_total
            );
        }
    })
}

/// Tileset name used in the header: the output directory's final component.
fn tileset_name(outdir: &Path) -> String {
    outdir
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "testtiles".to_string())
}
