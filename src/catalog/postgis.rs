//! PostGIS-backed layer catalog
//!
//! Every operation opens its own connection and releases it before
//! returning, whichever way the operation ends. There is no pool and no
//! connection shared between requests.

use std::ops::Deref;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

use super::config::DatabaseConfig;
use super::errors::{describe_pg_error, CatalogError, CatalogResult};
use super::geojson::LayerDocument;
use super::identifier::{is_safe_identifier, LayerName};
use super::source::LayerSource;
use super::sql::{fetch_layer_sql, GEOMETRY_COLUMN_SQL, LIST_LAYERS_SQL};

/// A connection that lives for exactly one catalog operation.
///
/// Dropping the guard drops the client, which ends the session, and aborts
/// the background task driving the socket if it is still running.
pub struct ScopedConnection {
    client: Client,
    driver: JoinHandle<()>,
}

impl ScopedConnection {
    /// Open a new connection to the configured database
    pub async fn open(config: &DatabaseConfig) -> CatalogResult<Self> {
        let (client, connection) = config
            .to_pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| CatalogError::Connect(describe_pg_error(&e)))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!(error = %e, "database connection closed with error");
            }
        });

        debug!(target_db = %config.display_target(), "database connection acquired");
        Ok(Self { client, driver })
    }
}

impl Deref for ScopedConnection {
    type Target = Client;

    fn deref(&self) -> &Client {
        &self.client
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.driver.abort();
        debug!("database connection released");
    }
}

/// Layer catalog reading from a PostGIS database.
#[derive(Debug, Clone)]
pub struct PostgisCatalog {
    config: DatabaseConfig,
}

impl PostgisCatalog {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    async fn query_layer_names(&self) -> CatalogResult<Vec<String>> {
        let conn = ScopedConnection::open(&self.config).await?;
        let rows = conn.query(LIST_LAYERS_SQL, &[]).await?;

        rows.iter()
            .map(|row| {
                row.try_get::<_, String>(0)
                    .map_err(|e| CatalogError::Decode(e.to_string()))
            })
            .collect()
    }

    /// Geometry column registered for `layer`, or the configured default
    /// when the table is not in `geometry_columns`.
    async fn geometry_column(&self, conn: &Client, layer: &LayerName) -> CatalogResult<String> {
        let row = conn.query_opt(GEOMETRY_COLUMN_SQL, &[&layer.as_str()]).await?;
        let Some(row) = row else {
            return Ok(self.config.geometry_column.clone());
        };

        let column: String = row
            .try_get(0)
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        if is_safe_identifier(&column) {
            Ok(column)
        } else {
            Err(CatalogError::Decode(format!(
                "geometry column {:?} of {} is not a plain identifier",
                column, layer
            )))
        }
    }

    async fn query_layer(&self, layer: &LayerName) -> CatalogResult<LayerDocument> {
        let conn = ScopedConnection::open(&self.config).await?;
        let column = self.geometry_column(&conn, layer).await?;

        let sql = fetch_layer_sql(layer, &column);
        let row = conn.query_one(sql.as_str(), &[&column]).await?;

        let document: String = row
            .try_get(0)
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        LayerDocument::from_json(document)
    }
}

#[async_trait]
impl LayerSource for PostgisCatalog {
    async fn list_layers(&self) -> CatalogResult<Vec<String>> {
        self.query_layer_names().await.map_err(|e| {
            error!(error = %e, "failed to list layers");
            e
        })
    }

    async fn fetch_layer(&self, layer: &LayerName) -> CatalogResult<LayerDocument> {
        match self.query_layer(layer).await {
            Ok(document) => {
                debug!(layer = %layer, features = document.len(), "layer fetched");
                Ok(document)
            }
            Err(e) => {
                error!(layer = %layer, error = %e, "failed to fetch layer");
                Err(e)
            }
        }
    }
}
