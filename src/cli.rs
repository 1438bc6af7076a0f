// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docklog")]
#[command(about = "Container log viewer API for Docker and Podman")]
#[command(version)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: docklog.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Runtime connection string, e.g. unix:///var/run/docker.sock or tcp://host:2375
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Listen address
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// List containers as JSON
    Ps {
        /// Include stopped containers
        #[arg(short, long)]
        all: bool,
    },

    /// Print container logs as JSON lines
    Logs {
        /// Container ID or name
        id: String,

        /// Only logs at or after this Unix timestamp
        #[arg(long, allow_hyphen_values = true)]
        since: Option<i64>,

        /// Only logs at or before this Unix timestamp
        #[arg(long, allow_hyphen_values = true)]
        until: Option<i64>,

        /// Only the last N lines of the selected range
        #[arg(short = 'n', long)]
        tail: Option<u64>,
    },

    /// Show the runtime's detail document for a container
    Inspect {
        /// Container ID or name
        id: String,
    },

    /// Start a container
    Start {
        /// Container ID or name
        id: String,
    },

    /// Stop a container
    Stop {
        /// Container ID or name
        id: String,
    },
}
