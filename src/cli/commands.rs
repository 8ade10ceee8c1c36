//! CLI command implementations
//!
//! `serve` runs the HTTP server. `layers`, `layer` and `check-name` run one
//! operation, print the result as JSON and exit.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::catalog::{is_safe_identifier, DatabaseConfig, LayerName, LayerSource, PostgisCatalog};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::logging::init_logging;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./capas.json";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// PostGIS connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Base log level (optional, default "info"; RUST_LOG overrides)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            database: DatabaseConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let mut config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if config.log_level.trim().is_empty() {
            config.log_level = default_log_level();
        }

        config.validate()?;

        Ok(config)
    }

    /// Resolve the configuration for a command.
    ///
    /// An explicit path must exist. Without one, `./capas.json` is used when
    /// present and built-in defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        self.database
            .validate()
            .map_err(|e| CliError::config_error(format!("Invalid database config: {}", e)))
    }
}

/// Run the parsed CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Layers { config } => layers(config.as_deref()),
        Command::Layer { name, config } => layer(&name, config.as_deref()),
        Command::CheckName { name } => check_name(&name),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP server and block until it stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    config.validate()?;

    init_logging(&config.log_level)?;
    info!(
        database = %config.database.display_target(),
        page = %config.http.page_path.display(),
        "starting layer server"
    );

    let source: Arc<dyn LayerSource> = Arc::new(PostgisCatalog::new(config.database.clone()));
    let server = HttpServer::new(config.http.clone(), source);

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the layer list and exit
pub fn layers(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    init_logging(&config.log_level)?;

    let catalog = PostgisCatalog::new(config.database);
    let names = runtime()?.block_on(catalog.list_layers())?;

    write_json(&names)
}

/// Print one layer as GeoJSON and exit
pub fn layer(name: &str, config_path: Option<&Path>) -> CliResult<()> {
    let layer = LayerName::parse(name)?;
    let config = Config::resolve(config_path)?;
    init_logging(&config.log_level)?;

    let catalog = PostgisCatalog::new(config.database);
    let document = runtime()?.block_on(catalog.fetch_layer(&layer))?;

    write_json(&document)
}

/// Report whether `name` would be accepted as a layer name
pub fn check_name(name: &str) -> CliResult<()> {
    let valid = is_safe_identifier(name);
    write_json(&json!({ "name": name, "valid": valid }))?;

    if valid {
        Ok(())
    } else {
        Err(CliError::invalid_name(name))
    }
}
