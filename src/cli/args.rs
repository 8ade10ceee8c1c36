//! CLI argument definitions using clap
//!
//! Commands:
//! - capas serve [--config <path>] [--port <port>]
//! - capas layers [--config <path>]
//! - capas layer <name> [--config <path>]
//! - capas check-name <name>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// capas - Serves PostGIS layers as GeoJSON to a web map
#[derive(Parser, Debug)]
#[command(name = "capas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply if omitted and ./capas.json is absent)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the names of all layers as a JSON array and exit
    Layers {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print one layer as a GeoJSON FeatureCollection and exit
    Layer {
        /// Layer (table) name
        name: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check whether a layer name is accepted, without touching the database
    CheckName {
        /// Candidate layer name
        name: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
