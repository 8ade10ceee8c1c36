//! # Layer Catalog
//!
//! Read access to the geometry tables of a PostGIS database.
//!
//! - `list_layers` - names of every table registered in `geometry_columns`
//! - `fetch_layer` - one table as a GeoJSON FeatureCollection
//!
//! Layer names must be validated into a [`LayerName`] before they can be
//! fetched; that check is the only protection for the interpolated table
//! identifier.

pub mod config;
pub mod errors;
pub mod geojson;
pub mod identifier;
pub mod postgis;
pub mod source;
pub mod sql;

pub use config::DatabaseConfig;
pub use errors::{describe_pg_error, CatalogError, CatalogResult};
pub use geojson::{Feature, FeatureCollection, LayerDocument};
pub use identifier::{is_safe_identifier, LayerName};
pub use postgis::{PostgisCatalog, ScopedConnection};
pub use source::LayerSource;
