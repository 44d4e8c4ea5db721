// src/lambda/mod.rs

//! AWS Lambda handler for the scraper.
//!
//! Each invocation:
//! 1. Loads `config/config.toml` from S3 (defaults when absent)
//! 2. Scrapes the requested season and window
//! 3. Writes a CSV snapshot and run summary back to S3

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::StoreConfigLoader;
use crate::error::Result;
use crate::models::{Config, StorageConfig};
use crate::pipeline::{ScrapeRun, run_and_save};
use crate::storage::S3Storage;
use crate::utils::http::HttpFetcher;
use crate::utils::log::summary_line;

const DEFAULT_S3_PREFIX: &str = "hoops-crawler";

/// Lambda invocation payload.
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    /// Season label, e.g. `2021-22`
    pub season: String,

    /// First game date (`YYYY-MM-DD`), defaults to the season start
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last game date (`YYYY-MM-DD`), defaults to the season end
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct ScrapeResponse {
    /// Whether the scrape was successful
    pub success: bool,

    /// Number of player rows written
    pub rows: usize,

    pub month_pages_skipped: usize,
    pub box_scores_skipped: usize,
    pub rows_dropped: usize,

    /// Snapshot object name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl ScrapeResponse {
    fn from_run(run: &ScrapeRun, snapshot: String) -> Self {
        Self {
            success: true,
            rows: run.outcome.rows.len(),
            month_pages_skipped: run.outcome.month_pages_skipped,
            box_scores_skipped: run.outcome.box_scores_skipped,
            rows_dropped: run.outcome.rows_dropped,
            snapshot: Some(snapshot),
            error: None,
            execution_time_ms: 0,
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<ScrapeRequest>,
) -> std::result::Result<ScrapeResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    info!(
        "Starting scrape: season={}, start_date={:?}, end_date={:?}",
        request.season, request.start_date, request.end_date
    );

    match run(&request).await {
        Ok(mut response) => {
            response.execution_time_ms = start.elapsed().as_millis() as u64;
            info!(
                "Scrape completed: {}",
                summary_line(&[
                    ("rows", response.rows.to_string()),
                    ("month_pages_skipped", response.month_pages_skipped.to_string()),
                    ("box_scores_skipped", response.box_scores_skipped.to_string()),
                    ("rows_dropped", response.rows_dropped.to_string()),
                    ("ms", response.execution_time_ms.to_string()),
                ])
            );
            Ok(response)
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            Ok(ScrapeResponse {
                success: false,
                error: Some(e.to_string()),
                execution_time_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            })
        }
    }
}

/// Internal scrape logic.
async fn run(request: &ScrapeRequest) -> Result<ScrapeResponse> {
    let storage = S3Storage::from_env(DEFAULT_S3_PREFIX).await?;
    let env_bucket = std::env::var("S3_BUCKET").ok().filter(|b| !b.is_empty());
    let config_bucket = env_bucket
        .clone()
        .unwrap_or_else(|| StorageConfig::default().bucket);

    let mut config = StoreConfigLoader::new(&storage, config_bucket)
        .load_config()
        .await?;
    apply_env_bucket(&mut config, env_bucket);
    let fetcher = HttpFetcher::from_config(&config.scraper)?;

    let (run, snapshot) = run_and_save(
        &config,
        &fetcher,
        &storage,
        &request.season,
        request.start_date.as_deref(),
        request.end_date.as_deref(),
    )
    .await?;

    Ok(ScrapeResponse::from_run(&run, snapshot))
}

/// Snapshots go to the bucket named by `S3_BUCKET` when it is set, the same
/// bucket the config was read from. Otherwise `[storage] bucket` applies.
fn apply_env_bucket(config: &mut Config, env_bucket: Option<String>) {
    if let Some(bucket) = env_bucket {
        config.storage.bucket = bucket;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_bucket_overrides_default_bucket() {
        let mut config = Config::default();
        apply_env_bucket(&mut config, Some("foo".into()));
        assert_eq!(config.storage.bucket, "foo");
    }

    #[test]
    fn test_env_bucket_overrides_stored_bucket() {
        let mut config = Config::from_toml("[storage]\nbucket = \"stored\"\n").unwrap();
        apply_env_bucket(&mut config, Some("foo".into()));
        assert_eq!(config.storage.bucket, "foo");
    }

    #[test]
    fn test_stored_bucket_kept_without_env() {
        let mut config = Config::from_toml("[storage]\nbucket = \"stored\"\n").unwrap();
        apply_env_bucket(&mut config, None);
        assert_eq!(config.storage.bucket, "stored");
    }

    #[test]
    fn test_scrape_request_defaults() {
        let json = r#"{"season": "2021-22"}"#;
        let req: ScrapeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.season, "2021-22");
        assert!(req.start_date.is_none());
        assert!(req.end_date.is_none());
    }

    #[test]
    fn test_scrape_request_with_window() {
        let json = r#"{"season": "2021-22", "start_date": "2021-10-19", "end_date": "2021-10-31"}"#;
        let req: ScrapeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.start_date.as_deref(), Some("2021-10-19"));
        assert_eq!(req.end_date.as_deref(), Some("2021-10-31"));
    }

    #[test]
    fn test_failed_response_omits_snapshot() {
        let response = ScrapeResponse {
            error: Some("boom".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("snapshot").is_none());
        assert_eq!(value["error"], "boom");
    }
}
