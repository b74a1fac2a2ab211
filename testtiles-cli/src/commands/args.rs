//! Clap value types for generate arguments.

use clap::ValueEnum;
use testtiles::output::TileFormat;
use testtiles::synth::PropertyProfile;

/// Property profile argument for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProfileArg {
    /// Only the per-tile `id` ordinal
    #[default]
    Minimal,
    /// Vessel tracks: series, time, speed and heading, plus per-vessel tilesets
    Vessel,
}

impl From<ProfileArg> for PropertyProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Minimal => PropertyProfile::Minimal,
            ProfileArg::Vessel => PropertyProfile::Vessel,
        }
    }
}

/// Tile file extension argument for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    /// `.pbf` files
    #[default]
    Pbf,
    /// `.mvt` files
    Mvt,
}

impl From<FormatArg> for TileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pbf => TileFormat::Pbf,
            FormatArg::Mvt => TileFormat::Mvt,
        }
    }
}
