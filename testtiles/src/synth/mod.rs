//! Point synthesis.
//!
//! [`PointSynthesizer`] fills a tile's local coordinate space with randomly
//! placed points. The random source is always supplied by the caller, so a
//! fixed seed reproduces the same points.

mod profile;

pub use profile::{
    ColumnKind, PropertyColumn, PropertyProfile, TemporalRange, DATE_FORMAT,
    DEFAULT_TEMPORAL_EXTENT_MS,
};

use rand::Rng;

use crate::coord::{sample_local_point, validate_extent, DEFAULT_EXTENT};
use crate::error::ConfigError;
use crate::tile::{PointFeature, ID_PROPERTY};

/// Check a caller-supplied points-per-tile count.
pub fn validate_count(count: i64) -> Result<usize, ConfigError> {
    usize::try_from(count).map_err(|_| ConfigError::InvalidCount(count))
}

/// Generates point features for one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSynthesizer {
    extent: u32,
    profile: PropertyProfile,
    temporal: TemporalRange,
    series_group: u64,
}

impl Default for PointSynthesizer {
    fn default() -> Self {
        Self {
            extent: DEFAULT_EXTENT,
            profile: PropertyProfile::Minimal,
            temporal: TemporalRange::default(),
            series_group: 0,
        }
    }
}

impl PointSynthesizer {
    /// Synthesizer for the given extent with the minimal property profile.
    pub fn new(extent: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            extent: validate_extent(extent)?,
            ..Self::default()
        })
    }

    pub fn with_profile(mut self, profile: PropertyProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_temporal(mut self, temporal: TemporalRange) -> Self {
        self.temporal = temporal;
        self
    }

    /// Set the `seriesgroup` written by the vessel profile.
    pub fn with_series_group(mut self, group: u64) -> Self {
        self.series_group = group;
        self
    }

    pub fn extent(&self) -> u32 {
        self.extent
    }

    pub fn profile(&self) -> PropertyProfile {
        self.profile
    }

    pub fn temporal(&self) -> TemporalRange {
        self.temporal
    }

    /// Produce exactly `count` points, each with an `id` equal to its
    /// ordinal in the tile. `count == 0` yields no points.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<PointFeature> {
        (0..count)
            .map(|idx| {
                let point = sample_local_point(rng, self.extent);
                let feature = PointFeature::at(point).with_property(ID_PROPERTY, idx as u64);
                match self.profile {
                    PropertyProfile::Minimal => feature,
                    PropertyProfile::Vessel => self.vessel_properties(feature, idx, count),
                }
            })
            .collect()
    }

    /// AIS-style track attributes: time and heading advance with the
    /// ordinal, the rest are constants.
    fn vessel_properties(&self, feature: PointFeature, idx: usize, count: usize) -> PointFeature {
        let fraction = idx as f64 / count as f64;
        let heading = 360.0 * (8.0 * fraction).round() / 8.0;

        feature
            .with_property("seriesgroup", self.series_group)
            .with_property("series", idx as u64 + 1)
            .with_property("datetime", self.temporal.at(fraction))
            .with_property("weight", 20.0)
            .with_property("sog", 20i64)
            .with_property("cog", heading)
            .with_property("sigma", 0.0)
    }
}
