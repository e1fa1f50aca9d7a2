use config::{Config as Layers, Environment, File, FileFormat};
use eyre::{eyre, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, env, time::Duration};

use crate::registry::{NetworkConfig, NetworkRegistry};

/// Built-in defaults, including the network table
const DEFAULTS: &str = include_str!("../config/default.toml");

/// Service configuration structure
///
/// Values are layered: built-in defaults, then an optional TOML file, then
/// `EXPLORER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Host address to bind the server to (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Number of HTTP worker threads (default: 4)
    pub workers: usize,

    /// Timeout for each JSON-RPC call in seconds (default: 10)
    pub request_timeout_secs: u64,

    /// Networks keyed by id
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// # Environment Variables
    ///
    /// * `EXPLORER_CONFIG` - Path of an optional TOML file (default: "explorer.toml")
    /// * `EXPLORER_HOST`, `EXPLORER_PORT`, `EXPLORER_WORKERS`, `EXPLORER_REQUEST_TIMEOUT_SECS`
    /// * `EXPLORER_NETWORKS__<ID>__RPC_URL` (and the other network fields)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        let path = env::var("EXPLORER_CONFIG").unwrap_or_else(|_| "explorer.toml".to_string());

        let config: Config = Layers::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::with_name(&path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("EXPLORER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Build configuration from the defaults overlaid with a TOML document
    pub fn from_toml(overrides: &str) -> Result<Self> {
        let config: Config = Layers::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Per-call JSON-RPC timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Immutable registry built from the configured networks
    pub fn registry(&self) -> NetworkRegistry {
        NetworkRegistry::new(self.networks.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.networks.is_empty() {
            return Err(eyre!("at least one network must be configured"));
        }
        if self.request_timeout_secs == 0 {
            return Err(eyre!("request_timeout_secs must be greater than zero"));
        }
        for (id, network) in &self.networks {
            reqwest::Url::parse(&network.rpc_url)
                .map_err(|e| eyre!("network '{}' has an invalid rpc_url: {}", id, e))?;
        }
        Ok(())
    }
}
