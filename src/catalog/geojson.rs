//! GeoJSON documents produced by the catalog

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use super::errors::{CatalogError, CatalogResult};

/// One row of a layer: its geometry plus every other column as a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Value,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// All qualifying features of one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// json_agg over zero rows yields NULL
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Feature>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Feature>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A FeatureCollection exactly as the database rendered it.
///
/// The text is checked for shape once and then passed through untouched, so
/// property order and numeric precision survive to the client.
#[derive(Debug, Clone)]
pub struct LayerDocument {
    raw: Box<RawValue>,
    features: usize,
}

#[derive(Deserialize)]
struct CollectionShape {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Option<Vec<IgnoredAny>>,
}

impl LayerDocument {
    /// Accept a JSON text if it is a FeatureCollection
    pub fn from_json(text: String) -> CatalogResult<Self> {
        let shape: CollectionShape =
            serde_json::from_str(&text).map_err(|e| CatalogError::Decode(e.to_string()))?;
        if shape.kind != "FeatureCollection" {
            return Err(CatalogError::Decode(format!(
                "expected a FeatureCollection, got {:?}",
                shape.kind
            )));
        }
        let features = shape.features.map_or(0, |f| f.len());

        let raw = RawValue::from_string(text).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(Self { raw, features })
    }

    /// Render a collection built in memory
    pub fn from_collection(collection: &FeatureCollection) -> CatalogResult<Self> {
        let text =
            serde_json::to_string(collection).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Self::from_json(text)
    }

    pub fn len(&self) -> usize {
        self.features
    }

    pub fn is_empty(&self) -> bool {
        self.features == 0
    }

    pub fn as_str(&self) -> &str {
        self.raw.get()
    }
}

impl Serialize for LayerDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
