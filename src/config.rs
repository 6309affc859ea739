use anyhow::{Context, Result, bail};
use common::money::is_known_currency;
use config::{Config, Environment, File};
use model::{InMemoryLedger, LedgerSnapshot};
use moka::future::Cache;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Runtime configuration, merged from defaults, an optional config file and
/// `FINTRACK_*` environment variables (in increasing priority).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// YAML or JSON ledger snapshot loaded at startup
    pub data_file: Option<PathBuf>,
    /// ISO 4217 code used when formatting amounts
    pub currency_code: String,
    /// Maximum number of cached simulation results
    pub cache_capacity: u64,
    /// Lifetime of cached simulation results
    pub cache_ttl_secs: u64,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            data_file: None,
            currency_code: "USD".to_string(),
            cache_capacity: 1000,
            cache_ttl_secs: 300,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads the configuration. `.env` is read first so its variables take
    /// part in the environment layer.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("currency_code", defaults.currency_code)?
            .set_default("cache_capacity", defaults.cache_capacity as i64)?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?;

        if let Some(path) = config_file {
            debug!("Reading configuration file {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("FINTRACK").try_parsing(true))
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = config
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_known_currency(&self.currency_code) {
            bail!("Unknown currency code '{}'", self.currency_code);
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builds the in-memory ledger from `data_file`, or an empty one.
pub fn load_ledger(data_file: Option<&Path>) -> Result<InMemoryLedger> {
    match data_file {
        Some(path) => {
            info!("Loading ledger from {}", path.display());
            let snapshot = LedgerSnapshot::load(path)
                .with_context(|| format!("Failed to read ledger file {}", path.display()))?;
            Ok(InMemoryLedger::from_snapshot(snapshot)?)
        }
        None => {
            info!("No data file configured, starting with an empty ledger");
            Ok(InMemoryLedger::new())
        }
    }
}

/// Initialize application state
pub fn initialize_app_state(config: AppConfig) -> Result<AppState> {
    let ledger = load_ledger(config.data_file.as_deref())?;

    let cache = Cache::builder()
        .max_capacity(config.cache_capacity)
        .time_to_live(config.cache_ttl())
        .build();

    Ok(AppState {
        store: Arc::new(RwLock::new(ledger)),
        cache,
        config: Arc::new(config),
    })
}
