// src/config.rs

//! Configuration loading utilities.
//!
//! The CLI reads `config.toml` from its storage directory; the Lambda reads
//! the same file from blob storage. Both fall back to defaults when the file
//! is absent.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::storage::BlobStore;

/// Object name of the configuration file inside a bucket.
pub const CONFIG_OBJECT: &str = "config/config.toml";

/// Config loader backed by blob storage.
pub struct StoreConfigLoader<'a> {
    store: &'a dyn BlobStore,
    bucket: String,
}

impl<'a> StoreConfigLoader<'a> {
    pub fn new(store: &'a dyn BlobStore, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Load and validate the stored configuration.
    ///
    /// A missing object yields the defaults. A present but unreadable or
    /// invalid one is an error.
    pub async fn load_config(&self) -> Result<Config> {
        let Some(bytes) = self.store.get(&self.bucket, CONFIG_OBJECT).await? else {
            log::info!(
                "No {} in {}, using default configuration",
                CONFIG_OBJECT,
                self.bucket
            );
            return Ok(Config::default());
        };

        let text = String::from_utf8(bytes).map_err(|e| {
            AppError::config(format!("{} is not valid UTF-8: {}", CONFIG_OBJECT, e))
        })?;
        let config = Config::from_toml(&text)?;
        config.validate()?;
        log::info!("Loaded configuration from {}/{}", self.bucket, CONFIG_OBJECT);
        Ok(config)
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if loading fails. The result is validated either
/// way.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config.validate()?;
    Ok(config)
}

/// Load and validate a TOML file strictly.
///
/// Unlike [`load_config`], a missing or unparsable file is an error.
pub fn check_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)?;
    config.validate()?;
    Ok(config)
}
