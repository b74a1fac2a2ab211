//! Tile encoder.

use ::mvt::{
    Error as MvtError, Feature, GeomEncoder, GeomType, Layer as MvtLayer, Tile as MvtTile,
};
use bytes::Bytes;
use std::collections::HashSet;
use tracing::trace;

use super::DEFAULT_EXTENT;
use crate::error::ValidationError;
use crate::tile::{Layer, PointFeature, Tile, Value};

/// Serializes [`Tile`]s into vector tile protobuf payloads.
///
/// The whole tile is validated before the `mvt` writer sees it, so a call
/// either returns a complete payload or an error.
#[derive(Debug, Clone, Copy)]
pub struct TileEncoder {
    write_feature_ids: bool,
}

impl Default for TileEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TileEncoder {
    /// Encoder that also writes each feature's `id` property into the
    /// feature id field.
    pub fn new() -> Self {
        Self {
            write_feature_ids: true,
        }
    }

    /// Skip the feature id field; ids remain available as a property.
    pub fn without_feature_ids(mut self) -> Self {
        self.write_feature_ids = false;
        self
    }

    pub fn encode(&self, tile: &Tile) -> Result<Bytes, ValidationError> {
        validate(tile)?;

        let extent = tile
            .layers
            .first()
            .map_or(DEFAULT_EXTENT, |layer| layer.extent);
        let mut out = MvtTile::new(extent);
        for layer in &tile.layers {
            let encoded = self.encode_layer(&out, layer)?;
            out.add_layer(encoded).map_err(encoding_error)?;
        }
        let data = out.to_bytes().map_err(encoding_error)?;

        trace!(
            tile = %tile.address,
            layers = tile.layers.len(),
            bytes = data.len(),
            "Encoded tile"
        );
        Ok(Bytes::from(data))
    }

    fn encode_layer(&self, out: &MvtTile, layer: &Layer) -> Result<MvtLayer, ValidationError> {
        let mut encoded = out.create_layer(&layer.name);
        for feature in &layer.features {
            let point = feature.point();
            let geometry = GeomEncoder::new(GeomType::Point)
                .point(f64::from(point.x), f64::from(point.y))
                .and_then(|encoder| encoder.encode())
                .map_err(encoding_error)?;

            let mut tagged = encoded.into_feature(geometry);
            if self.write_feature_ids {
                if let Some(id) = feature.id() {
                    tagged.set_id(id);
                }
            }
            add_tags(&mut tagged, feature);
            encoded = tagged.into_layer();
        }
        Ok(encoded)
    }
}

/// Encode with the default encoder.
pub fn encode(tile: &Tile) -> Result<Bytes, ValidationError> {
    TileEncoder::new().encode(tile)
}

/// Reject tiles a conformant reader would misinterpret. Coordinates are
/// never clamped.
pub fn validate(tile: &Tile) -> Result<(), ValidationError> {
    let mut names = HashSet::with_capacity(tile.layers.len());
    let expected = tile.layers.first().map(|layer| layer.extent);
    for layer in &tile.layers {
        if layer.name.is_empty() {
            return Err(ValidationError::EmptyLayerName);
        }
        if !names.insert(layer.name.as_str()) {
            return Err(ValidationError::DuplicateLayer(layer.name.clone()));
        }
        if layer.extent == 0 || layer.extent > i32::MAX as u32 {
            return Err(ValidationError::InvalidExtent {
                layer: layer.name.clone(),
                extent: layer.extent,
            });
        }
        if let Some(expected) = expected.filter(|&e| e != layer.extent) {
            return Err(ValidationError::MixedExtent {
                layer: layer.name.clone(),
                extent: layer.extent,
                expected,
            });
        }
        for (index, feature) in layer.features.iter().enumerate() {
            if !feature.point().within(layer.extent) {
                return Err(ValidationError::CoordinateOutOfRange {
                    layer: layer.name.clone(),
                    feature: index,
                    x: feature.local_x,
                    y: feature.local_y,
                    extent: layer.extent,
                });
            }
            let mut keys = HashSet::with_capacity(feature.properties.len());
            for (key, _) in &feature.properties {
                if !keys.insert(key.as_str()) {
                    return Err(ValidationError::DuplicateProperty {
                        layer: layer.name.clone(),
                        feature: index,
                        key: key.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn add_tags(tagged: &mut Feature, feature: &PointFeature) {
    for (key, value) in &feature.properties {
        match value {
            Value::String(s) => tagged.add_tag_string(key, s),
            Value::Float(v) => tagged.add_tag_float(key, *v),
            Value::Double(v) => tagged.add_tag_double(key, *v),
            Value::Int(v) => tagged.add_tag_int(key, *v),
            Value::UInt(v) => tagged.add_tag_uint(key, *v),
            Value::SInt(v) => tagged.add_tag_sint(key, *v),
            Value::Bool(v) => tagged.add_tag_bool(key, *v),
        }
    }
}

fn encoding_error(err: MvtError) -> ValidationError {
    ValidationError::Encoding(err.to_string())
}
