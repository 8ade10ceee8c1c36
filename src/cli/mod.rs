//! CLI module for capas
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP server
//! - layers: One-shot layer listing
//! - layer: One-shot layer export as GeoJSON
//! - check-name: One-shot layer name validation

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_name, layer, layers, run, run_command, serve, Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};
