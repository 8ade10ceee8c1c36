//! Liveness Route
//!
//! `GET /health` answers as soon as the router is serving. It never opens a
//! database connection, so an unreachable PostGIS does not make the process
//! look dead; `/layers` is the place to see that.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Liveness {
    fn current() -> Self {
        Self {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// `/health`, independent of the layer source
pub fn health_routes() -> Router {
    Router::new().route("/health", get(|| async { Json(Liveness::current()) }))
}
