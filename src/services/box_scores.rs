// src/services/box_scores.rs

//! Player stat extraction across box score pages.

use scraper::Html;

use crate::error::Result;
use crate::extract::{BoxScoreRows, extract_player_rows};
use crate::models::{BoxScoreLinks, BoxScoreRef, PlayerStatRow};
use crate::utils::http::PageFetcher;
use crate::utils::pacing::Pacer;

/// Rows gathered from a set of box score pages.
#[derive(Debug, Default)]
pub struct PlayerStats {
    pub rows: Vec<PlayerStatRow>,
    /// Pages attempted
    pub pages: usize,
    /// Pages that failed to fetch or parse
    pub pages_skipped: usize,
    /// Player rows rejected for not matching the schema
    pub rows_dropped: usize,
}

/// Fetches box score pages and turns them into player rows.
pub struct PlayerStatExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    pacer: Pacer,
    show_progress: bool,
}

impl<'a> PlayerStatExtractor<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, pacer: Pacer) -> Self {
        Self {
            fetcher,
            pacer,
            show_progress: false,
        }
    }

    /// Log every page URL at info level instead of debug.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Visit every box score, month group by month group.
    ///
    /// Failed pages are skipped and counted, malformed rows are dropped and
    /// counted. The pacer runs between consecutive fetches.
    pub async fn extract(&self, links: &BoxScoreLinks) -> PlayerStats {
        let mut stats = PlayerStats::default();
        let total = links.game_count();

        for game in links.batches.iter().flatten() {
            if stats.pages > 0 {
                self.pacer.pause().await;
            }
            stats.pages += 1;

            if self.show_progress {
                log::info!("[{}/{}] {}", stats.pages, total, game.url);
            } else {
                log::debug!("[{}/{}] {}", stats.pages, total, game.url);
            }

            let page = match self.fetcher.fetch_text(&game.url).await {
                Ok(text) => parse_box_score(&text, game),
                Err(e) => Err(e),
            };

            match page {
                Ok(page) => {
                    if page.rows.is_empty() {
                        log::warn!("No player rows on {}", game.url);
                    }
                    for rejected in &page.rejected {
                        log::warn!("Dropping row on {}: {}", game.url, rejected);
                    }
                    stats.rows_dropped += page.rejected.len();
                    stats.rows.extend(page.rows);
                }
                Err(e) if e.is_fetch_failure() => {
                    stats.pages_skipped += 1;
                    log::warn!("Skipping box score {}: {}", game.url, e);
                }
                Err(e) => {
                    stats.pages_skipped += 1;
                    log::error!("Could not read box score {}: {}", game.url, e);
                }
            }
        }

        stats
    }
}

fn parse_box_score(text: &str, game: &BoxScoreRef) -> Result<BoxScoreRows> {
    let document = Html::parse_document(text);
    extract_player_rows(&document, &game.url, &game.formatted_date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PacingConfig;
    use crate::utils::http::StaticFetcher;
    use chrono::NaiveDate;
    use std::time::Duration;

    const MIL: &str = "https://www.basketball-reference.com/boxscores/202110190MIL.html";
    const CHO: &str = "https://www.basketball-reference.com/boxscores/202110200CHO.html";
    const PHO: &str = "https://www.basketball-reference.com/boxscores/202111030PHO.html";

    fn game(url: &str, y: i32, m: u32, d: u32) -> BoxScoreRef {
        BoxScoreRef {
            url: url.to_string(),
            game_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    fn extractor(fetcher: &StaticFetcher) -> PlayerStatExtractor<'_> {
        PlayerStatExtractor::new(
            fetcher,
            Pacer::from_window(PacingConfig::none().box_score_delay()),
        )
    }

    #[tokio::test]
    async fn test_extract_walks_groups_in_order() {
        let fetcher = StaticFetcher::new()
            .with_page(MIL, include_str!("../../tests/fixtures/202110190MIL.html"))
            .with_page(CHO, include_str!("../../tests/fixtures/202110200CHO.html"))
            .with_page(PHO, include_str!("../../tests/fixtures/202111030PHO.html"));
        let links = BoxScoreLinks {
            batches: vec![
                vec![game(MIL, 2021, 10, 19), game(CHO, 2021, 10, 20)],
                vec![game(PHO, 2021, 11, 3)],
            ],
            skipped_pages: 0,
        };

        let stats = extractor(&fetcher).extract(&links).await;

        assert_eq!(fetcher.requests(), vec![MIL, CHO, PHO]);
        assert_eq!(stats.pages, 3);
        assert_eq!(stats.pages_skipped, 0);
        // Kyrie Irving's "Not With Team" row does not fit the schema.
        assert_eq!(stats.rows_dropped, 1);
        assert_eq!(stats.rows.first().map(|r| r.date.as_str()), Some("2021-10-19"));
        assert_eq!(stats.rows.last().map(|r| r.date.as_str()), Some("2021-11-03"));
        assert!(stats.rows.iter().any(|r| r.name == "Jonas Valanciunas"));
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped() {
        let fetcher = StaticFetcher::new()
            .with_status(MIL, 429)
            .with_page(CHO, include_str!("../../tests/fixtures/202110200CHO.html"));
        let links = BoxScoreLinks {
            batches: vec![vec![game(MIL, 2021, 10, 19), game(CHO, 2021, 10, 20)]],
            skipped_pages: 0,
        };

        let stats = extractor(&fetcher).extract(&links).await;

        assert_eq!(stats.pages, 2);
        assert_eq!(stats.pages_skipped, 1);
        assert_eq!(stats.rows.len(), 4);
        assert!(stats.rows.iter().all(|r| r.date == "2021-10-20"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_between_box_scores_only() {
        let fetcher = StaticFetcher::new()
            .with_page(MIL, include_str!("../../tests/fixtures/202110190MIL.html"))
            .with_page(CHO, include_str!("../../tests/fixtures/202110200CHO.html"))
            .with_page(PHO, include_str!("../../tests/fixtures/202111030PHO.html"));
        let links = BoxScoreLinks {
            batches: vec![
                vec![game(MIL, 2021, 10, 19), game(CHO, 2021, 10, 20)],
                vec![game(PHO, 2021, 11, 3)],
            ],
            skipped_pages: 0,
        };
        let pacing = PacingConfig::default();
        let extractor =
            PlayerStatExtractor::new(&fetcher, Pacer::from_window(pacing.box_score_delay()));

        let start = tokio::time::Instant::now();
        extractor.extract(&links).await;
        let elapsed = start.elapsed();

        // Three pages, two gaps.
        assert!(elapsed >= Duration::from_millis(2 * pacing.box_score_delay_min_ms));
        assert!(elapsed <= Duration::from_millis(2 * pacing.box_score_delay_max_ms));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_box_score_does_not_pause() {
        let fetcher = StaticFetcher::new()
            .with_page(MIL, include_str!("../../tests/fixtures/202110190MIL.html"));
        let links = BoxScoreLinks {
            batches: vec![vec![game(MIL, 2021, 10, 19)]],
            skipped_pages: 0,
        };
        let extractor = PlayerStatExtractor::new(
            &fetcher,
            Pacer::from_window(PacingConfig::default().box_score_delay()),
        );

        let start = tokio::time::Instant::now();
        extractor.extract(&links).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_empty_links_fetch_nothing() {
        let fetcher = StaticFetcher::new();
        let stats = extractor(&fetcher).extract(&BoxScoreLinks::default()).await;
        assert!(stats.rows.is_empty());
        assert!(fetcher.requests().is_empty());
    }
}
