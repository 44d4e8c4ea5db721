//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and target site settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Delays between page fetches
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Snapshot storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.scraper.base_url)
            .map_err(|e| AppError::validation(format!("scraper.base_url is invalid: {e}")))?;
        if self.pacing.month_delay_min_ms > self.pacing.month_delay_max_ms {
            return Err(AppError::validation(
                "pacing.month_delay_min_ms must be <= pacing.month_delay_max_ms",
            ));
        }
        if self.pacing.box_score_delay_min_ms > self.pacing.box_score_delay_max_ms {
            return Err(AppError::validation(
                "pacing.box_score_delay_min_ms must be <= pacing.box_score_delay_max_ms",
            ));
        }
        if self.storage.bucket.trim().is_empty() {
            return Err(AppError::validation("storage.bucket is empty"));
        }
        Ok(())
    }
}

/// HTTP client and target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Site root that relative links resolve against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Randomized delay windows between page fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "defaults::month_delay_min")]
    pub month_delay_min_ms: u64,

    #[serde(default = "defaults::month_delay_max")]
    pub month_delay_max_ms: u64,

    #[serde(default = "defaults::box_score_delay_min")]
    pub box_score_delay_min_ms: u64,

    #[serde(default = "defaults::box_score_delay_max")]
    pub box_score_delay_max_ms: u64,
}

impl PacingConfig {
    /// No delays at all. Used for fixture replay.
    pub fn none() -> Self {
        Self {
            month_delay_min_ms: 0,
            month_delay_max_ms: 0,
            box_score_delay_min_ms: 0,
            box_score_delay_max_ms: 0,
        }
    }

    pub fn month_delay(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.month_delay_min_ms),
            Duration::from_millis(self.month_delay_max_ms),
        )
    }

    pub fn box_score_delay(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.box_score_delay_min_ms),
            Duration::from_millis(self.box_score_delay_max_ms),
        )
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            month_delay_min_ms: defaults::month_delay_min(),
            month_delay_max_ms: defaults::month_delay_max(),
            box_score_delay_min_ms: defaults::box_score_delay_min(),
            box_score_delay_max_ms: defaults::box_score_delay_max(),
        }
    }
}

/// Where snapshots are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket (S3) or sub-directory (local) holding snapshots
    #[serde(default = "defaults::bucket")]
    pub bucket: String,

    /// File name prefix for snapshot objects
    #[serde(default = "defaults::prefix")]
    pub prefix: String,

    /// Root directory for the local backend
    #[serde(default = "defaults::local_dir")]
    pub local_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: defaults::bucket(),
            prefix: defaults::prefix(),
            local_dir: defaults::local_dir(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Log every scraped box score URL at info level
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    // Scraper defaults
    pub fn base_url() -> String {
        "https://www.basketball-reference.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; hoops-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Pacing defaults
    pub fn month_delay_min() -> u64 {
        500
    }
    pub fn month_delay_max() -> u64 {
        2_000
    }
    pub fn box_score_delay_min() -> u64 {
        3_000
    }
    pub fn box_score_delay_max() -> u64 {
        7_000
    }

    // Storage defaults
    pub fn bucket() -> String {
        "nba-box-scores".into()
    }
    pub fn prefix() -> String {
        "player_stats".into()
    }
    pub fn local_dir() -> String {
        "storage".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}
