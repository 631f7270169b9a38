//! # Tracker Config Repository
//!
//! Keeps the tracker configuration in a single YAML file, `config.yaml`, next to
//! the card snapshot.
//!
//! ```text
//! data/
//! ├── config.yaml    ← This module manages this file
//! └── cards.json
//! ```
//!
//! ## YAML Format
//!
//! ```yaml
//! data_format_version: "1.0"
//! seed_example_cards: true
//! form:
//!   max_amount: 1000000000.0
//!   currency_symbol: "$"
//! created_at: "2025-01-21T19:30:00+00:00"
//! updated_at: "2025-01-21T19:35:00+00:00"
//! ```
//!
//! Missing keys fall back to their defaults, so older files keep loading.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;

use super::connection::{write_atomically, JsonConnection};
use shared::CardFormConfig;

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Data format version for future migrations
    pub data_format_version: String,
    /// Start with the two example cards when no snapshot exists yet
    pub seed_example_cards: bool,
    /// Form parsing and amount display settings
    pub form: CardFormConfig,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            data_format_version: "1.0".to_string(),
            seed_example_cards: true,
            form: CardFormConfig::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// YAML-backed config repository
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    connection: JsonConnection,
}

impl ConfigRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Load the config, writing the defaults first if the file does not exist
    pub fn load_or_create(&self) -> Result<TrackerConfig> {
        let config_path = self.connection.config_file_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config {}", config_path.display()))?;
            let config: TrackerConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse config {}", config_path.display()))?;
            debug!("Loaded tracker config from {:?}", config_path);
            Ok(config)
        } else {
            let config = TrackerConfig::default();
            self.save(&config)?;
            info!("Created default tracker config at {:?}", config_path);
            Ok(config)
        }
    }

    /// Save the config, refreshing `updated_at`
    pub fn save(&self, config: &TrackerConfig) -> Result<()> {
        let mut config = config.clone();
        config.updated_at = Utc::now().to_rfc3339();

        let yaml_content = serde_yaml::to_string(&config).context("Failed to serialize tracker config")?;
        write_atomically(&self.connection.config_file_path(), &yaml_content)?;

        debug!("Saved tracker config");
        Ok(())
    }
}
