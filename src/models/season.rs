//! Season label resolution.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::DateWindow;

static SEASON_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("season pattern is valid"));

/// A season such as `2021-22`, resolved to the calendar years it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    label: String,
    start_year: i32,
    end_year: i32,
}

impl Season {
    /// Resolve a `YYYY-YY` label.
    ///
    /// The two-digit suffix is spliced onto the century of the start year,
    /// except `00`, which always means the following year. A suffix that does
    /// not land on `start_year + 1` is rejected.
    pub fn parse(label: &str) -> Result<Self> {
        let label = label.trim();
        let caps = SEASON_LABEL
            .captures(label)
            .ok_or_else(|| AppError::MalformedSeason(label.to_string()))?;

        let start = &caps[1];
        let suffix = &caps[2];
        let start_year: i32 = start
            .parse()
            .map_err(|_| AppError::MalformedSeason(label.to_string()))?;

        let end_year = if suffix == "00" {
            start_year + 1
        } else {
            format!("{}{}", &start[..2], suffix)
                .parse()
                .map_err(|_| AppError::MalformedSeason(label.to_string()))?
        };

        if end_year != start_year + 1 {
            return Err(AppError::MalformedSeason(label.to_string()));
        }

        Ok(Self {
            label: label.to_string(),
            start_year,
            end_year,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Calendar year the season starts in (October-December games).
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Calendar year the season concludes in. Site URLs are keyed on this.
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// URL of the season's schedule index page.
    pub fn schedule_url(&self, base_url: &str) -> String {
        format!(
            "{}/leagues/NBA_{}_games.html",
            base_url.trim_end_matches('/'),
            self.end_year
        )
    }

    /// Default window covering the whole season, 1 October through 30 September.
    pub fn full_window(&self) -> DateWindow {
        let start = NaiveDate::from_ymd_opt(self.start_year, 10, 1).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(self.end_year, 9, 30).unwrap_or_default();
        DateWindow::from_ordered(start, end)
    }
}

impl FromStr for Season {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
