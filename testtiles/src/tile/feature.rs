//! Point features and the layers that hold them.

use super::Value;
use crate::coord::{LocalPoint, DEFAULT_EXTENT};

/// Property key carrying the per-tile feature ordinal.
pub const ID_PROPERTY: &str = "id";

/// A single point in tile-local coordinates with its properties.
///
/// Properties keep insertion order so that encoding is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub local_x: i32,
    pub local_y: i32,
    pub properties: Vec<(String, Value)>,
}

impl PointFeature {
    pub fn new(local_x: i32, local_y: i32) -> Self {
        Self {
            local_x,
            local_y,
            properties: Vec::new(),
        }
    }

    pub fn at(point: LocalPoint) -> Self {
        Self::new(point.x, point.y)
    }

    /// Append a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Look up a property by key.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// The `id` property, when present and a non-negative integer.
    pub fn id(&self) -> Option<u64> {
        self.property(ID_PROPERTY).and_then(Value::as_u64)
    }

    pub fn point(&self) -> LocalPoint {
        LocalPoint::new(self.local_x, self.local_y)
    }
}

/// A named set of point features sharing one extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub extent: u32,
    pub features: Vec<PointFeature>,
}

impl Layer {
    /// Empty layer at the standard 4096 extent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extent: DEFAULT_EXTENT,
            features: Vec::new(),
        }
    }

    pub fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_features(mut self, features: Vec<PointFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn push(&mut self, feature: PointFeature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
