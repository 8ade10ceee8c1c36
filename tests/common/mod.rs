//! Shared fixtures for the HTTP tests
//!
//! - An in-memory layer source that filters rows the way the PostGIS query does
//! - A source that always fails, with a call counter
//! - Helpers to drive the router with `oneshot`

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use capas::catalog::{
    CatalogError, CatalogResult, Feature, FeatureCollection, LayerDocument, LayerName,
    LayerSource,
};
use capas::http_server::{HttpServer, HttpServerConfig};

/// One table row: an optional geometry, a validity flag and attribute columns.
#[derive(Debug, Clone)]
pub struct Row {
    pub geometry: Option<Value>,
    pub valid: bool,
    pub attributes: Map<String, Value>,
}

impl Row {
    pub fn point(x: f64, y: f64, attributes: Value) -> Self {
        Self {
            geometry: Some(serde_json::json!({"type": "Point", "coordinates": [x, y]})),
            valid: true,
            attributes: attributes.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn null_geometry(attributes: Value) -> Self {
        Self {
            geometry: None,
            valid: false,
            attributes: attributes.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn invalid(attributes: Value) -> Self {
        Self {
            geometry: Some(serde_json::json!({
                "type": "Polygon",
                "coordinates": [[[0, 0], [1, 1], [1, 0], [0, 1], [0, 0]]]
            })),
            valid: false,
            attributes: attributes.as_object().cloned().unwrap_or_default(),
        }
    }
}

/// Tables held in memory, keyed by name.
#[derive(Default)]
pub struct InMemorySource {
    tables: BTreeMap<String, Vec<Row>>,
    fetches: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, rows: Vec<Row>) -> Self {
        self.tables.insert(name.to_string(), rows);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LayerSource for InMemorySource {
    async fn list_layers(&self) -> CatalogResult<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    async fn fetch_layer(&self, layer: &LayerName) -> CatalogResult<LayerDocument> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let rows = self.tables.get(layer.as_str()).ok_or_else(|| {
            CatalogError::Query(format!("relation \"{}\" does not exist", layer))
        })?;

        let features = rows
            .iter()
            .filter(|row| row.valid)
            .filter_map(|row| {
                row.geometry.clone().map(|geometry| Feature {
                    geometry,
                    properties: row.attributes.clone(),
                })
            })
            .collect();

        LayerDocument::from_collection(&FeatureCollection::new(features))
    }
}

/// A single layer whose document is served exactly as given.
pub struct RawDocumentSource {
    name: String,
    document: String,
}

impl RawDocumentSource {
    pub fn new(name: &str, document: &str) -> Self {
        Self {
            name: name.to_string(),
            document: document.to_string(),
        }
    }
}

#[async_trait]
impl LayerSource for RawDocumentSource {
    async fn list_layers(&self) -> CatalogResult<Vec<String>> {
        Ok(vec![self.name.clone()])
    }

    async fn fetch_layer(&self, layer: &LayerName) -> CatalogResult<LayerDocument> {
        if layer.as_str() != self.name {
            return Err(CatalogError::Query(format!(
                "relation \"{}\" does not exist",
                layer
            )));
        }
        LayerDocument::from_json(self.document.clone())
    }
}

/// A source whose database is unreachable.
#[derive(Default)]
pub struct FailingSource {
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LayerSource for FailingSource {
    async fn list_layers(&self) -> CatalogResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CatalogError::Connect(
            "password authentication failed for user \"postgres\"".to_string(),
        ))
    }

    async fn fetch_layer(&self, _layer: &LayerName) -> CatalogResult<LayerDocument> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CatalogError::Query(
            "relation \"public.secret_table\" does not exist".to_string(),
        ))
    }
}

pub fn router_with(source: Arc<dyn LayerSource>) -> Router {
    HttpServer::build_router(&HttpServerConfig::default(), source)
}

pub fn router_with_config(config: &HttpServerConfig, source: Arc<dyn LayerSource>) -> Router {
    HttpServer::build_router(config, source)
}

/// Issue a GET and return status plus raw body
pub async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

/// Issue a GET and parse the body as JSON
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    let value = serde_json::from_slice(&body).unwrap();
    (status, value)
}
