//! # Bridge Configuration
//!
//! Startup options for the bridge process.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_SEED=false                                               │
//! │     STOCKROOM_CHANNEL_CAPACITY=128                                     │
//! │     STOCKROOM_CURRENCY=EUR                                             │
//! │     STOCKROOM_COMPANY_NAME="Corner Shop"                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $STOCKROOM_CONFIG, else                                            │
//! │     ~/.config/stockroom/bridge.toml (Linux)                            │
//! │     ~/Library/Application Support/com.stockroom.stockroom/bridge.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     seeded sample data, capacity 64, default settings                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bridge.toml
//! seed_sample_data = true
//! channel_capacity = 64
//! company_name = "Corner Shop"
//! currency = "GBP"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use stockroom_core::{Currency, Settings};
use stockroom_store::RecordStore;

use crate::error::{BridgeError, BridgeResult};

pub const CONFIG_PATH_ENV: &str = "STOCKROOM_CONFIG";
pub const SEED_ENV: &str = "STOCKROOM_SEED";
pub const CHANNEL_CAPACITY_ENV: &str = "STOCKROOM_CHANNEL_CAPACITY";
pub const CURRENCY_ENV: &str = "STOCKROOM_CURRENCY";
pub const COMPANY_NAME_ENV: &str = "STOCKROOM_COMPANY_NAME";

const CONFIG_FILE_NAME: &str = "bridge.toml";

/// Complete bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Start with the sample products and sales.
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,

    /// Bound of the gateway's request channel. Callers wait when it is full.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Overrides the default company name in the initial settings.
    #[serde(default)]
    pub company_name: Option<String>,

    /// Overrides the default currency in the initial settings.
    #[serde(default)]
    pub currency: Option<Currency>,
}

fn default_true() -> bool {
    true
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            seed_sample_data: default_true(),
            channel_capacity: default_channel_capacity(),
            company_name: None,
            currency: None,
        }
    }
}

impl BridgeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$STOCKROOM_CONFIG`, or `bridge.toml`
    ///    in the platform config directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> BridgeResult<Self> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load bridge config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads a TOML file. A missing file yields the defaults.
    pub fn from_file(path: PathBuf) -> BridgeResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading bridge config from file");
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.channel_capacity == 0 {
            return Err(BridgeError::ConfigInvalid(
                "channel_capacity must be greater than 0".into(),
            ));
        }

        if matches!(&self.company_name, Some(name) if name.trim().is_empty()) {
            return Err(BridgeError::ConfigInvalid(
                "company_name must not be blank".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a variable lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(SEED_ENV) {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.seed_sample_data = true,
                "0" | "false" | "no" => self.seed_sample_data = false,
                _ => warn!(value = %seed, "Unknown {} value in environment", SEED_ENV),
            }
        }

        if let Some(capacity) = lookup(CHANNEL_CAPACITY_ENV) {
            match capacity.parse::<usize>() {
                Ok(c) => {
                    debug!(capacity = c, "Overriding channel capacity from environment");
                    self.channel_capacity = c;
                }
                Err(_) => warn!(value = %capacity, "Invalid {} in environment", CHANNEL_CAPACITY_ENV),
            }
        }

        if let Some(code) = lookup(CURRENCY_ENV) {
            match code.parse::<Currency>() {
                Ok(currency) => self.currency = Some(currency),
                Err(e) => warn!(value = %code, error = %e, "Ignoring {}", CURRENCY_ENV),
            }
        }

        if let Some(name) = lookup(COMPANY_NAME_ENV) {
            self.company_name = Some(name);
        }
    }

    /// Settings the store starts with.
    pub fn initial_settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(name) = &self.company_name {
            settings.company_name = name.clone();
        }
        if let Some(currency) = self.currency {
            settings.currency = currency;
        }
        settings
    }

    /// Builds the record store this configuration describes.
    pub fn build_store(&self) -> RecordStore {
        let mut store = if self.seed_sample_data {
            RecordStore::with_sample_data()
        } else {
            RecordStore::new()
        };
        store.save_settings(self.initial_settings());
        store
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
