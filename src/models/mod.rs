// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

pub mod calendar;
mod config;
mod schedule;
mod season;
mod stats;
pub mod teams;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export all public types
pub use config::{Config, LoggingConfig, PacingConfig, ScraperConfig, StorageConfig};
pub use schedule::{BoxScoreLinks, BoxScoreRef, DATE_FORMAT, DateWindow, MonthLink, parse_date};
pub use season::Season;
pub use stats::{COLUMNS, DNP, PlayerStatRow, STAT_COUNT, StatLine};

/// Everything a scrape run produced, including what it had to skip.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub rows: Vec<PlayerStatRow>,
    pub month_pages: usize,
    pub month_pages_skipped: usize,
    pub box_scores: usize,
    pub box_scores_skipped: usize,
    pub rows_dropped: usize,
}

impl ScrapeOutcome {
    /// Whether a month page or box score page was skipped.
    ///
    /// Dropped rows do not count: a page that was read is covered even when
    /// some of its rows did not fit the schema.
    pub fn is_partial(&self) -> bool {
        self.month_pages_skipped > 0 || self.box_scores_skipped > 0
    }
}

/// Run statistics written next to each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeStats {
    pub season: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub row_count: usize,
    pub dnp_count: usize,
    pub month_pages: usize,
    pub month_pages_skipped: usize,
    pub box_scores: usize,
    pub box_scores_skipped: usize,
    pub rows_dropped: usize,
}

impl ScrapeStats {
    pub fn new(
        season: &Season,
        window: &DateWindow,
        outcome: &ScrapeOutcome,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            season: season.label().to_string(),
            start_date: window.start().format(DATE_FORMAT).to_string(),
            end_date: window.end().format(DATE_FORMAT).to_string(),
            start_time,
            end_time,
            row_count: outcome.rows.len(),
            dnp_count: outcome.rows.iter().filter(|r| r.did_not_play()).count(),
            month_pages: outcome.month_pages,
            month_pages_skipped: outcome.month_pages_skipped,
            box_scores: outcome.box_scores,
            box_scores_skipped: outcome.box_scores_skipped,
            rows_dropped: outcome.rows_dropped,
        }
    }
}
