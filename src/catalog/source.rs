//! The seam between the HTTP layer and the spatial database

use async_trait::async_trait;

use super::errors::CatalogResult;
use super::geojson::LayerDocument;
use super::identifier::LayerName;

/// Read-only access to the layer catalog.
#[async_trait]
pub trait LayerSource: Send + Sync {
    /// Names of every geometry-bearing table, in ascending lexical order.
    async fn list_layers(&self) -> CatalogResult<Vec<String>>;

    /// Every feature of `layer` whose geometry is present and valid, as one
    /// FeatureCollection document.
    async fn fetch_layer(&self, layer: &LayerName) -> CatalogResult<LayerDocument>;
}
