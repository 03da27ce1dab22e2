//! Application configuration management.
//!
//! Configuration merges from multiple sources with a clear precedence:
//! defaults, then a config file, then environment variables.

use crate::{Cli, sweep::SweepConfig};
use serde::{Deserialize, Serialize};

/// The main application configuration composing all component configs.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, pagination limit)
    #[serde(default)]
    pub server: mkt_axum::config::ServerConfig,

    /// Database configuration (file path, creation behavior)
    #[serde(default)]
    pub database: mkt_sqlite::config::SqliteConfig,

    /// Settlement sweep scheduling configuration
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `APP_<SECTION>__<KEY>` → `<section>.<key>`.
    ///
    /// # Examples
    ///
    /// ```bash
    /// export APP_DATABASE__DATABASE_PATH="/data/market.db"
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// export APP_SWEEP__EVERY="30s"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // maps APP_SERVER__BIND_ADDRESS to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built = config.build()?;
        built.try_deserialize().map_err(Into::into)
    }
}
