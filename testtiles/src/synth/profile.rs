//! Property profiles and the time range they draw from.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::ConfigError;

/// Wall-clock format for timestamps given on the command line and used
/// in time slice labels.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default temporal extent: 30 days in milliseconds.
pub const DEFAULT_TEMPORAL_EXTENT_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 30.0;

/// Which properties each synthesized point carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyProfile {
    /// Only the per-tile `id` ordinal.
    #[default]
    Minimal,
    /// `id` plus vessel track attributes (series, time, speed, heading).
    Vessel,
}

impl PropertyProfile {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyProfile::Minimal => "minimal",
            PropertyProfile::Vessel => "vessel",
        }
    }

    /// Describe the properties this profile writes, for tileset metadata.
    pub fn columns(&self, temporal: &TemporalRange, count: usize) -> Vec<PropertyColumn> {
        let max_ordinal = count.saturating_sub(1) as f64;
        let mut columns = vec![PropertyColumn::new(
            "id",
            ColumnKind::UInt,
            0.0,
            max_ordinal,
        )];
        if *self == PropertyProfile::Vessel {
            columns.extend([
                PropertyColumn::new("seriesgroup", ColumnKind::UInt, 1.0, f64::MAX),
                PropertyColumn::new("series", ColumnKind::UInt, 1.0, count.max(1) as f64),
                PropertyColumn::new(
                    "datetime",
                    ColumnKind::Double,
                    temporal.start_ms(),
                    temporal.end_ms(),
                )
                .hidden(),
                PropertyColumn::new("weight", ColumnKind::Double, 0.0, 20.0),
                PropertyColumn::new("sog", ColumnKind::Int, 0.0, 30.0),
                PropertyColumn::new("cog", ColumnKind::Double, 0.0, 360.0),
                PropertyColumn::new("sigma", ColumnKind::Double, 0.0, 0.0),
            ]);
        }
        columns
    }
}

impl fmt::Display for PropertyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value type of a property column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    UInt,
    Int,
    Double,
}

impl ColumnKind {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::UInt => "UInt64",
            ColumnKind::Int => "Int64",
            ColumnKind::Double => "Float64",
        }
    }
}

/// Range and type of one synthesized property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub min: f64,
    pub max: f64,
    pub hidden: bool,
}

impl PropertyColumn {
    fn new(name: &'static str, kind: ColumnKind, min: f64, max: f64) -> Self {
        Self {
            name,
            kind,
            min,
            max,
            hidden: false,
        }
    }

    fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Time span, in milliseconds since the Unix epoch, that point timestamps
/// are spread across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalRange {
    start_ms: f64,
    extent_ms: f64,
}

impl Default for TemporalRange {
    fn default() -> Self {
        Self {
            start_ms: 0.0,
            extent_ms: DEFAULT_TEMPORAL_EXTENT_MS,
        }
    }
}

impl TemporalRange {
    pub fn new(start_ms: f64, extent_ms: f64) -> Result<Self, ConfigError> {
        if !extent_ms.is_finite() || extent_ms <= 0.0 {
            return Err(ConfigError::InvalidTemporalExtent(extent_ms));
        }
        Ok(Self {
            start_ms,
            extent_ms,
        })
    }

    /// Range starting at a wall-clock instant.
    pub fn starting_at(start: DateTime<Utc>, extent_ms: f64) -> Result<Self, ConfigError> {
        Self::new(start.timestamp_millis() as f64, extent_ms)
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn extent_ms(&self) -> f64 {
        self.extent_ms
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.extent_ms
    }

    /// Timestamp at `fraction` (0.0 to 1.0) of the way through the range.
    pub fn at(&self, fraction: f64) -> f64 {
        self.start_ms + fraction * self.extent_ms
    }

    /// Range start as a UTC timestamp, if representable.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_ms as i64)
    }

    /// Range end as a UTC timestamp, if representable.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.end_ms() as i64)
    }

    /// `count` back-to-back windows, each as long as this range, the
    /// first starting where this range starts.
    pub fn slices(&self, count: usize) -> Result<Vec<TemporalRange>, ConfigError> {
        if count == 0 {
            return Err(ConfigError::InvalidSliceCount);
        }
        Ok((0..count)
            .map(|i| TemporalRange {
                start_ms: self.start_ms + i as f64 * self.extent_ms,
                extent_ms: self.extent_ms,
            })
            .collect())
    }

    /// Range covering `count` back-to-back windows of this length.
    pub fn spanning(&self, count: usize) -> Result<TemporalRange, ConfigError> {
        if count == 0 {
            return Err(ConfigError::InvalidSliceCount);
        }
        TemporalRange::new(self.start_ms, self.extent_ms * count as f64)
    }

    /// `start,end` in [`DATE_FORMAT`], used to name a time slice.
    pub fn label(&self) -> Option<String> {
        let start = self.start()?;
        let end = self.end()?;
        Some(format!(
            "{},{}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT)
        ))
    }
}
