//! testtiles CLI - Command-line interface
//!
//! Generates a synthetic vector tile pyramid into a directory.

mod commands;
mod error;
mod runner;

use clap::Parser;
use std::path::PathBuf;
use testtiles::generator::{DEFAULT_COUNT, DEFAULT_LAYER_NAME, DEFAULT_MAX_ZOOM};
use testtiles::logging::default_log_dir;

use commands::args::{FormatArg, ProfileArg};
use commands::generate::GenerateArgs;

#[derive(Debug, Parser)]
#[command(name = "testtiles")]
#[command(version = testtiles::VERSION)]
#[command(about = "Generate a synthetic vector tile pyramid for testing tile clients", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Output directory; tiles are written to OUTDIR/<zoom>/<col>/<row>.<ext>
    outdir: PathBuf,

    /// Highest zoom level to generate (each level z holds 4^z tiles)
    #[arg(short = 'l', long, visible_alias = "levels", default_value_t = DEFAULT_MAX_ZOOM)]
    max_zoom: i64,

    /// Points per tile
    #[arg(short = 'c', long, default_value_t = DEFAULT_COUNT)]
    count: i64,

    /// Tile-local coordinate resolution
    #[arg(long, default_value_t = testtiles::coord::DEFAULT_EXTENT)]
    extent: u32,

    /// Name of the point layer
    #[arg(long, default_value = DEFAULT_LAYER_NAME)]
    layer: String,

    /// Random seed; a random one is chosen and reported when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Area to cover as minlon,minlat,maxlon,maxlat (default: whole world)
    #[arg(long)]
    bounds: Option<String>,

    /// Properties attached to each point
    #[arg(long, value_enum, default_value_t = ProfileArg::Minimal)]
    profile: ProfileArg,

    /// Start of the vessel timestamps, as YYYY-MM-DDTHH:MM:SS (UTC)
    #[arg(short = 's', long)]
    temporal_start: Option<String>,

    /// Length of the vessel time span in milliseconds (per slice with -E)
    #[arg(short = 'e', long)]
    temporal_extent: Option<f64>,

    /// Split the run into this many back-to-back time slices, each written
    /// as a full tileset under OUTDIR/<start>,<end>/
    #[arg(short = 'E', long)]
    temporal_extent_count: Option<usize>,

    /// Tile file extension
    #[arg(long, value_enum, default_value_t = FormatArg::Pbf)]
    format: FormatArg,

    /// Worker threads (1 generates on the main thread)
    #[arg(short = 'j', long, default_value_t = 1)]
    threads: usize,

    /// Skip writing the tileset header file
    #[arg(long)]
    no_header: bool,

    /// Log at debug level and echo logs to stdout
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Directory for the log file
    #[arg(long, default_value = default_log_dir())]
    log_dir: PathBuf,
}

impl From<Args> for GenerateArgs {
    fn from(args: Args) -> Self {
        GenerateArgs {
            outdir: args.outdir,
            max_zoom: args.max_zoom,
            count: args.count,
            extent: args.extent,
            layer: args.layer,
            seed: args.seed,
            bounds: args.bounds,
            profile: args.profile.into(),
            temporal_start: args.temporal_start,
            temporal_extent: args.temporal_extent,
            temporal_extent_count: args.temporal_extent_count,
            format: args.format.into(),
            threads: args.threads,
            no_header: args.no_header,
            verbose: args.verbose,
            log_dir: args.log_dir,
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = commands::generate::run(args.into()) {
        e.exit();
    }
}
