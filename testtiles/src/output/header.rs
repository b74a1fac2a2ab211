//! Tileset header metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coord::Bounds;
use crate::generator::TilesetGenerator;
use crate::synth::{PropertyProfile, TemporalRange};

/// Name of the header file at the tileset root.
pub const HEADER_FILE_NAME: &str = "header";

/// Version string written to every header.
pub const TILESET_VERSION: &str = "1";

/// Range and type of one feature property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

/// JSON document describing a generated tileset.
///
/// Every tile in a run has the same layout, so one header covers all of
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetHeader {
    pub tileset_name: String,
    pub tileset_version: String,
    pub extent: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub bounds: [f64; 4],
    pub layers: Vec<String>,
    pub seed: u64,
    pub points_per_tile: usize,
    pub profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_max: Option<String>,
    pub cols_by_name: BTreeMap<String, ColumnInfo>,
    /// Each series group also has its own tileset under `sub/`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub series_tilesets: bool,
    /// Series tilesets carry an `info` document for the selected vessel.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub info_uses_selection: bool,
    /// Tiles are split into time slices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_extents: Option<bool>,
}

impl TilesetHeader {
    /// Describe the tileset `generator` produces.
    pub fn for_generator(name: impl Into<String>, generator: &TilesetGenerator) -> Self {
        let temporal = generator.temporal();
        let profile = generator.profile();

        let cols_by_name = profile
            .columns(&temporal, generator.count())
            .into_iter()
            .map(|column| {
                (
                    column.name.to_string(),
                    ColumnInfo {
                        kind: column.kind.name().to_string(),
                        min: column.min,
                        max: column.max,
                        hidden: column.hidden,
                    },
                )
            })
            .collect();

        let (time_min, time_max) = match profile {
            PropertyProfile::Vessel => (
                temporal.start().map(|t| t.to_rfc3339()),
                temporal.end().map(|t| t.to_rfc3339()),
            ),
            PropertyProfile::Minimal => (None, None),
        };

        Self {
            tileset_name: name.into(),
            tileset_version: TILESET_VERSION.to_string(),
            extent: generator.extent(),
            min_zoom: 0,
            max_zoom: generator.pyramid().max_zoom(),
            bounds: generator.pyramid().bounds().to_array(),
            layers: vec![generator.layer_name().to_string()],
            seed: generator.seed(),
            points_per_tile: generator.count(),
            profile: profile.name().to_string(),
            time_min,
            time_max,
            cols_by_name,
            series_tilesets: false,
            info_uses_selection: false,
            temporal_extents: None,
        }
    }

    /// Announce the per-series-group tilesets and their info documents.
    pub fn with_series_tilesets(mut self) -> Self {
        self.series_tilesets = true;
        self.info_uses_selection = true;
        self
    }

    /// Mark the tileset as split into time slices.
    pub fn with_temporal_extents(mut self) -> Self {
        self.temporal_extents = Some(true);
        self
    }

    /// Header for the single-tile track of one series group, derived from
    /// the tileset's header.
    pub fn for_series_group(&self, group: u64) -> Self {
        Self {
            tileset_name: format!("Track for {}", group),
            min_zoom: 0,
            max_zoom: 0,
            bounds: Bounds::world().to_array(),
            series_tilesets: true,
            info_uses_selection: true,
            ..self.clone()
        }
    }

    /// Replace the time columns with `temporal`, for a header that covers
    /// a different time span than the generator it was built from.
    pub fn with_time_range(mut self, temporal: &TemporalRange) -> Self {
        if self.time_min.is_some() {
            self.time_min = temporal.start().map(|t| t.to_rfc3339());
            self.time_max = temporal.end().map(|t| t.to_rfc3339());
        }
        if let Some(column) = self.cols_by_name.get_mut("datetime") {
            column.min = temporal.start_ms();
            column.max = temporal.end_ms();
        }
        self
    }
}
