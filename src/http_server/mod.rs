//! # Layer Map HTTP Server Module
//!
//! Serves the map page and the layer catalog as JSON.
//!
//! # Endpoints
//!
//! - `/` - HTML page hosting the map
//! - `/static/*` - client assets for the page
//! - `/layers` - names of all geometry tables
//! - `/layer_data?name=<layer>` - one layer as a GeoJSON FeatureCollection
//! - `/health` - liveness, never touches the database

pub mod config;
pub mod errors;
pub mod layer_routes;
pub mod observability_routes;
pub mod page_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
