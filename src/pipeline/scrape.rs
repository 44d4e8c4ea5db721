// src/pipeline/scrape.rs

//! Season scraping pipeline.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::export;
use crate::models::{Config, DateWindow, ScrapeOutcome, ScrapeStats, Season, parse_date};
use crate::services::{
    BoxScoreLinkExtractor, MonthPageLocator, PlayerStatExtractor, filter_months,
};
use crate::storage::BlobStore;
use crate::utils::http::PageFetcher;
use crate::utils::log as progress;
use crate::utils::pacing::Pacer;

const TOTAL_STEPS: usize = 3;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    pub season: Season,
    pub window: DateWindow,
    pub outcome: ScrapeOutcome,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl ScrapeRun {
    pub fn stats(&self) -> ScrapeStats {
        ScrapeStats::new(
            &self.season,
            &self.window,
            &self.outcome,
            self.start_time,
            self.end_time,
        )
    }
}

/// Resolve the caller's date bounds against a season.
///
/// A missing bound falls back to the season's full window on that side.
pub fn resolve_window(
    season: &Season,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateWindow> {
    let full = season.full_window();
    let start = start.map(parse_date).transpose()?.unwrap_or(full.start());
    let end = end.map(parse_date).transpose()?.unwrap_or(full.end());
    DateWindow::new(start, end)
}

/// Scrape every player row for `season` within the given dates.
///
/// The season label and the window are checked before anything is fetched.
/// A failure on the season index aborts the run; failures on month or box
/// score pages are skipped and reported in the outcome.
pub async fn run_scrape(
    config: &Config,
    fetcher: &dyn PageFetcher,
    season: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<ScrapeRun> {
    let season = Season::parse(season)?;
    let window = resolve_window(&season, start, end)?;

    let start_time = Utc::now();
    progress::header(&format!(
        "Scraping {} ({} to {})",
        season,
        window.start(),
        window.end()
    ));

    progress::step(1, TOTAL_STEPS, "Locating month pages");
    let months = MonthPageLocator::new(fetcher, &config.scraper.base_url)
        .locate(&season)
        .await?;
    let months = filter_months(&months, &window, &season);
    progress::sub_item(&format!("{} month pages overlap the window", months.len()));

    progress::step(2, TOTAL_STEPS, "Collecting box score links");
    let month_pacer = Pacer::from_window(config.pacing.month_delay());
    let links = BoxScoreLinkExtractor::new(fetcher, month_pacer)
        .collect(&months, &window)
        .await;
    if links.is_empty() {
        log::warn!("No box scores in window for {}", season);
    } else {
        progress::sub_item(&format!("{} games found", links.game_count()));
    }

    progress::step(3, TOTAL_STEPS, "Extracting player stats");
    let box_score_pacer = Pacer::from_window(config.pacing.box_score_delay());
    let stats = PlayerStatExtractor::new(fetcher, box_score_pacer)
        .with_progress(config.logging.show_progress)
        .extract(&links)
        .await;

    let outcome = ScrapeOutcome {
        rows: stats.rows,
        month_pages: months.len(),
        month_pages_skipped: links.skipped_pages,
        box_scores: stats.pages,
        box_scores_skipped: stats.pages_skipped,
        rows_dropped: stats.rows_dropped,
    };

    let run = ScrapeRun {
        season,
        window,
        outcome,
        start_time,
        end_time: Utc::now(),
    };
    report(&run);
    Ok(run)
}

/// Scrape, then store the rows as a new snapshot. Returns the run and the
/// snapshot name.
pub async fn run_and_save(
    config: &Config,
    fetcher: &dyn PageFetcher,
    store: &dyn BlobStore,
    season: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(ScrapeRun, String)> {
    let run = run_scrape(config, fetcher, season, start, end).await?;

    let name = export::snapshot_name(&config.storage.prefix, &run.season, run.end_time);
    export::save_snapshot(
        store,
        &config.storage.bucket,
        &name,
        &run.outcome.rows,
        &run.stats(),
    )
    .await?;
    progress::success(&format!("Snapshot saved: {}", name));

    Ok((run, name))
}

fn report(run: &ScrapeRun) {
    let outcome = &run.outcome;
    let stats = run.stats();
    progress::summary(
        "Scrape complete",
        &[
            ("Rows", stats.row_count.to_string()),
            ("Did not play", stats.dnp_count.to_string()),
            ("Month pages", outcome.month_pages.to_string()),
            ("Month pages skipped", outcome.month_pages_skipped.to_string()),
            ("Box scores", outcome.box_scores.to_string()),
            ("Box scores skipped", outcome.box_scores_skipped.to_string()),
            ("Rows dropped", outcome.rows_dropped.to_string()),
            (
                "Elapsed",
                format!("{}s", (run.end_time - run.start_time).num_seconds()),
            ),
        ],
    );
    if outcome.is_partial() {
        log::warn!(
            "Coverage is partial: {} month pages and {} box scores skipped",
            outcome.month_pages_skipped,
            outcome.box_scores_skipped
        );
    }
    if outcome.rows_dropped > 0 {
        log::warn!("{} rows dropped for not matching the schema", outcome.rows_dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::NaiveDate;

    fn season() -> Season {
        Season::parse("2021-22").unwrap()
    }

    #[test]
    fn test_resolve_window_defaults_to_full_season() {
        let window = resolve_window(&season(), None, None).unwrap();
        assert_eq!(window, season().full_window());
    }

    #[test]
    fn test_resolve_window_fills_missing_side() {
        let window = resolve_window(&season(), Some("2022-01-15"), None).unwrap();
        assert_eq!(window.start(), NaiveDate::from_ymd_opt(2022, 1, 15).unwrap());
        assert_eq!(window.end(), NaiveDate::from_ymd_opt(2022, 9, 30).unwrap());
    }

    #[test]
    fn test_resolve_window_rejects_inverted_bounds() {
        let err = resolve_window(&season(), Some("2022-02-01"), Some("2022-01-01")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
    }
}
