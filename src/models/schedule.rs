//! Schedule-side data: month pages, date windows and box score references.

use chrono::NaiveDate;

use crate::error::{AppError, Result};

/// Date format accepted from callers and emitted in output rows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A month's schedule page as linked from the season index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLink {
    /// Lowercased link text, e.g. `october`
    pub name: String,
    /// Absolute URL of the month page
    pub url: String,
}

impl MonthLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Inclusive calendar date range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Build a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AppError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub(crate) fn from_ordered(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `[first, last]` overlaps this window.
    pub fn intersects(&self, first: NaiveDate, last: NaiveDate) -> bool {
        first <= self.end && last >= self.start
    }
}

/// Parse a caller-supplied `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| AppError::InvalidDate {
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// A game's box score page and the date it was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxScoreRef {
    pub url: String,
    pub game_date: NaiveDate,
}

impl BoxScoreRef {
    /// Game date as it appears in output rows.
    pub fn formatted_date(&self) -> String {
        self.game_date.format(DATE_FORMAT).to_string()
    }
}

/// Box score references grouped by the month page they came from.
///
/// Groups are in month order and never empty; a month page that yielded no
/// games in the window is not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxScoreLinks {
    pub batches: Vec<Vec<BoxScoreRef>>,
    /// Month pages that failed to fetch and were skipped
    pub skipped_pages: usize,
}

impl BoxScoreLinks {
    /// Box score URLs, one inner list per month page.
    pub fn urls(&self) -> Vec<Vec<&str>> {
        self.batches
            .iter()
            .map(|batch| batch.iter().map(|r| r.url.as_str()).collect())
            .collect()
    }

    /// Game dates (`YYYY-MM-DD`), parallel to [`BoxScoreLinks::urls`].
    pub fn dates(&self) -> Vec<Vec<String>> {
        self.batches
            .iter()
            .map(|batch| batch.iter().map(BoxScoreRef::formatted_date).collect())
            .collect()
    }

    pub fn game_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
