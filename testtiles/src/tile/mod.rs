//! Tile data model.
//!
//! A [`Tile`] is built, encoded and dropped within a single generation
//! step. Nothing here is shared between tiles.
//!
//! ```text
//! Tile (address)
//!  └── Layer (name, extent)
//!       └── PointFeature (local_x, local_y, properties)
//! ```

mod feature;
mod value;

pub use feature::{Layer, PointFeature, ID_PROPERTY};
pub use value::Value;

use crate::coord::TileAddress;

/// One tile's worth of layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub address: TileAddress,
    pub layers: Vec<Layer>,
}

impl Tile {
    pub fn new(address: TileAddress) -> Self {
        Self {
            address,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Find a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Total features across all layers.
    pub fn feature_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_properties_keep_order() {
        let feature = PointFeature::new(1, 2)
            .with_property("id", 0u64)
            .with_property("name", "a")
            .with_property("weight", 20.0);

        let keys: Vec<_> = feature.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "name", "weight"]);
        assert_eq!(feature.property("name"), Some(&Value::String("a".into())));
        assert_eq!(feature.property("missing"), None);
    }

    #[test]
    fn test_feature_id() {
        assert_eq!(PointFeature::new(0, 0).with_property("id", 7u64).id(), Some(7));
        assert_eq!(PointFeature::new(0, 0).with_property("id", 3i64).id(), Some(3));
        assert_eq!(PointFeature::new(0, 0).with_property("id", -3i64).id(), None);
        assert_eq!(PointFeature::new(0, 0).id(), None);
    }

    #[test]
    fn test_layer_defaults_to_standard_extent() {
        let layer = Layer::new("points");
        assert_eq!(layer.extent, 4096);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_tile_feature_count() {
        let address = TileAddress::new(0, 0, 0).unwrap();
        let tile = Tile::new(address)
            .with_layer(Layer::new("a").with_features(vec![PointFeature::new(0, 0)]))
            .with_layer(Layer::new("b").with_features(vec![
                PointFeature::new(1, 1),
                PointFeature::new(2, 2),
            ]));
        assert_eq!(tile.feature_count(), 3);
        assert_eq!(tile.layer("b").map(Layer::len), Some(2));
        assert!(tile.layer("c").is_none());
    }

    #[test]
    fn test_value_numeric_views() {
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::SInt(-2).as_f64(), Some(-2.0));
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::UInt(9).as_u64(), Some(9));
        assert_eq!(Value::String("9".into()).as_u64(), None);
    }
}
