//! Database Configuration
//!
//! Connection parameters for the PostGIS database holding the layers.

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};
use super::identifier::is_safe_identifier;

/// PostGIS connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (default: 5432)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name (default: "postgres")
    #[serde(default = "default_dbname")]
    pub dbname: String,

    /// Role to connect as (default: "postgres")
    #[serde(default = "default_user")]
    pub user: String,

    /// Password (default: empty)
    #[serde(default)]
    pub password: String,

    /// Geometry column for tables missing from `geometry_columns` (default: "geom").
    /// Registered tables use the column recorded there.
    #[serde(default = "default_geometry_column")]
    pub geometry_column: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "postgres".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_geometry_column() -> String {
    "geom".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: String::new(),
            geometry_column: default_geometry_column(),
        }
    }
}

impl DatabaseConfig {
    /// Check the values that cannot be caught by the database itself.
    ///
    /// The geometry column is spliced into SQL text like the layer name, so
    /// it must pass the same identifier check.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.host.trim().is_empty() {
            return Err(CatalogError::Connect("database host must not be empty".into()));
        }
        if self.dbname.trim().is_empty() {
            return Err(CatalogError::Connect("database name must not be empty".into()));
        }
        if !is_safe_identifier(&self.geometry_column) {
            return Err(CatalogError::InvalidIdentifier(self.geometry_column.clone()));
        }
        Ok(())
    }

    /// Build the driver configuration
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .application_name(env!("CARGO_PKG_NAME"));
        if !self.password.is_empty() {
            config.password(&self.password);
        }
        config
    }

    /// Connection target for log lines, without credentials
    pub fn display_target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.dbname)
    }
}
