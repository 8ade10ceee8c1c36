//! capas - Serves PostGIS layers as GeoJSON to a web map
//!
//! - `catalog`: layer listing and GeoJSON export from PostGIS
//! - `http_server`: the map page and the JSON endpoints
//! - `cli`: command-line entry points

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod logging;
