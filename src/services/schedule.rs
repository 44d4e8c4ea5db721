// src/services/schedule.rs

//! Schedule services: locate a season's month pages, narrow them to a date
//! window, and collect the box score links each page lists.

use std::collections::HashSet;

use scraper::Html;

use crate::error::Result;
use crate::extract::{extract_box_score_refs, extract_month_links};
use crate::models::calendar::month_span;
use crate::models::{BoxScoreLinks, BoxScoreRef, DateWindow, MonthLink, Season};
use crate::utils::http::PageFetcher;
use crate::utils::pacing::Pacer;

/// Finds the month pages linked from a season's schedule index.
pub struct MonthPageLocator<'a> {
    fetcher: &'a dyn PageFetcher,
    base_url: &'a str,
}

impl<'a> MonthPageLocator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, base_url: &'a str) -> Self {
        Self { fetcher, base_url }
    }

    /// Fetch the season index and return its month links in page order.
    ///
    /// Any fetch failure is returned as is; without the index there is
    /// nothing to scrape.
    pub async fn locate(&self, season: &Season) -> Result<Vec<MonthLink>> {
        let url = season.schedule_url(self.base_url);
        log::info!("Fetching season index {}", url);

        let text = self.fetcher.fetch_text(&url).await?;
        let links = parse_month_links(&text, &url)?;

        if links.is_empty() {
            log::warn!("No month pages listed for season {}", season);
        } else {
            log::debug!(
                "Season {} lists {} month pages: {}",
                season,
                links.len(),
                links
                    .iter()
                    .map(|l| l.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(links)
    }
}

fn parse_month_links(text: &str, url: &str) -> Result<Vec<MonthLink>> {
    let document = Html::parse_document(text);
    extract_month_links(&document, url)
}

/// Keep the month pages whose month overlaps `window`, oldest first.
///
/// Links naming no month, and repeats of an already kept URL, are dropped.
pub fn filter_months(links: &[MonthLink], window: &DateWindow, season: &Season) -> Vec<MonthLink> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for link in links {
        let Some(span) = month_span(&link.name, season) else {
            continue;
        };
        if window.intersects(span.first, span.last) && seen.insert(link.url.as_str()) {
            kept.push((span.first, link));
        }
    }

    kept.sort_by_key(|(first, _)| *first);
    kept.into_iter().map(|(_, link)| link.clone()).collect()
}

/// Walks month pages and gathers the box score links inside a window.
pub struct BoxScoreLinkExtractor<'a> {
    fetcher: &'a dyn PageFetcher,
    pacer: Pacer,
}

impl<'a> BoxScoreLinkExtractor<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, pacer: Pacer) -> Self {
        Self { fetcher, pacer }
    }

    /// Fetch each month page in turn.
    ///
    /// A page that fails to fetch or parse is logged, counted in
    /// [`BoxScoreLinks::skipped_pages`] and passed over. The pacer runs
    /// between pages, never after the last one.
    pub async fn collect(&self, months: &[MonthLink], window: &DateWindow) -> BoxScoreLinks {
        let mut links = BoxScoreLinks::default();

        for (i, month) in months.iter().enumerate() {
            if i > 0 {
                self.pacer.pause().await;
            }

            let refs = match self.fetcher.fetch_text(&month.url).await {
                Ok(text) => parse_box_score_refs(&text, &month.url, window),
                Err(e) => Err(e),
            };

            match refs {
                Ok(refs) if refs.is_empty() => {
                    log::debug!("No games in window on {} ({})", month.name, month.url);
                }
                Ok(refs) => {
                    log::info!("{}: {} box scores", month.name, refs.len());
                    links.batches.push(refs);
                }
                Err(e) => {
                    links.skipped_pages += 1;
                    log::warn!("Skipping month page {} ({}): {}", month.name, month.url, e);
                }
            }
        }

        links
    }
}

fn parse_box_score_refs(text: &str, url: &str, window: &DateWindow) -> Result<Vec<BoxScoreRef>> {
    let document = Html::parse_document(text);
    extract_box_score_refs(&document, url, window)
}
