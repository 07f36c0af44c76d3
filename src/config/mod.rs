use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11222/rest/v2";

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub console: ConsoleSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Cluster REST endpoint, e.g. `http://localhost:11222/rest/v2`.
    pub endpoint: String,
    /// Request timeout applied to every call.
    pub timeout_seconds: u64,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConsoleSettings {
    /// Cache manager (container) the console operates on. When absent, the
    /// first manager the cluster reports is used.
    pub container: Option<String>,
}

impl Settings {
    /// Create settings from CLI arguments (config file plus CLI overrides).
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .set_default("connection.endpoint", DEFAULT_ENDPOINT)?
            .set_default("connection.timeout_seconds", 30)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file (env flows in through clap).
        settings.apply_cli_overrides(cli);

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.connection.endpoint = endpoint.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.connection.timeout_seconds = timeout;
        }
        if let Some(container) = &cli.container {
            self.console.container = Some(container.clone());
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout_seconds)
    }
}
