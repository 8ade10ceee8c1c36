//! Layer HTTP Routes
//!
//! - `GET /layers` - names of all geometry tables
//! - `GET /layer_data?name=<layer>` - one layer as a FeatureCollection

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::warn;

use crate::catalog::{LayerDocument, LayerName, LayerSource};

use super::errors::ApiError;

// ==================
// Shared State
// ==================

/// Layer state shared across handlers
pub struct LayerState {
    pub source: Arc<dyn LayerSource>,
}

impl LayerState {
    pub fn new(source: Arc<dyn LayerSource>) -> Self {
        Self { source }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct LayerDataQuery {
    #[serde(default)]
    pub name: Option<String>,
}

// ==================
// Layer Routes
// ==================

/// Create layer routes
pub fn layer_routes(state: Arc<LayerState>) -> Router {
    Router::new()
        .route("/layers", get(list_layers_handler))
        .route("/layer_data", get(layer_data_handler))
        .with_state(state)
}

async fn list_layers_handler(
    State(state): State<Arc<LayerState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    state
        .source
        .list_layers()
        .await
        .map(Json)
        .map_err(|_| ApiError::LayerListUnavailable)
}

async fn layer_data_handler(
    State(state): State<Arc<LayerState>>,
    Query(query): Query<LayerDataQuery>,
) -> Result<Json<LayerDocument>, ApiError> {
    let raw_name = query.name.ok_or(ApiError::MissingLayerName)?;

    // Must happen before the name gets anywhere near SQL
    let layer = LayerName::parse(raw_name).map_err(|e| {
        warn!(error = %e, "rejected layer name");
        ApiError::InvalidLayerName
    })?;

    state
        .source
        .fetch_layer(&layer)
        .await
        .map(Json)
        .map_err(|_| ApiError::LayerUnavailable)
}
