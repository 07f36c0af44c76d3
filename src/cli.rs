use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Management console for clustered data-grid caches
#[derive(Parser, Debug, Clone)]
#[command(name = "krater", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "KRATER_CONFIG", default_value = "krater.toml")]
    pub config: PathBuf,

    /// Cluster REST endpoint, e.g. http://localhost:11222/rest/v2
    #[arg(long, env = "KRATER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "KRATER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Cache manager (container) to operate on
    #[arg(long, env = "KRATER_CONTAINER")]
    pub container: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the cluster's cache managers
    Managers,
    /// Show one cache manager in detail
    Manager {
        /// Cache manager name
        name: String,
    },
    /// List the configuration templates available in the container
    Templates,
    /// Create a cache from a template or a configuration document
    Create {
        /// Name of the cache to create
        cache_name: String,

        /// Configuration template to instantiate
        #[arg(long, conflicts_with = "file")]
        template: Option<String>,

        /// Path to a JSON or XML configuration document
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
