//! Season calendar: which calendar year and date span a month page covers.
//!
//! October through December games are played in the season's start year,
//! everything from January on in its end year. A link text that carries its
//! own four-digit year (`october 2020`, used for seasons that ran long)
//! overrides that rule.

use chrono::NaiveDate;

use crate::models::Season;

/// Which of the season's two years a month falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonYear {
    Start,
    End,
}

/// One calendar month as seen from a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonMonth {
    pub name: &'static str,
    pub month: u32,
    pub year: SeasonYear,
}

/// Months in season order.
#[rustfmt::skip]
pub static SEASON_CALENDAR: [SeasonMonth; 12] = [
    SeasonMonth { name: "october", month: 10, year: SeasonYear::Start },
    SeasonMonth { name: "november", month: 11, year: SeasonYear::Start },
    SeasonMonth { name: "december", month: 12, year: SeasonYear::Start },
    SeasonMonth { name: "january", month: 1, year: SeasonYear::End },
    SeasonMonth { name: "february", month: 2, year: SeasonYear::End },
    SeasonMonth { name: "march", month: 3, year: SeasonYear::End },
    SeasonMonth { name: "april", month: 4, year: SeasonYear::End },
    SeasonMonth { name: "may", month: 5, year: SeasonYear::End },
    SeasonMonth { name: "june", month: 6, year: SeasonYear::End },
    SeasonMonth { name: "july", month: 7, year: SeasonYear::End },
    SeasonMonth { name: "august", month: 8, year: SeasonYear::End },
    SeasonMonth { name: "september", month: 9, year: SeasonYear::End },
];

/// The concrete dates a month page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

/// Find the month named in a link text such as `"October"` or `"october 2020"`.
pub fn find_month(text: &str) -> Option<&'static SeasonMonth> {
    tokens(text).find_map(|token| SEASON_CALENDAR.iter().find(|m| m.name == token))
}

/// Resolve a link text to the dates it covers within `season`.
pub fn month_span(text: &str, season: &Season) -> Option<MonthSpan> {
    let month = find_month(text)?;
    let year = explicit_year(text).unwrap_or(match month.year {
        SeasonYear::Start => season.start_year(),
        SeasonYear::End => season.end_year(),
    });

    let first = NaiveDate::from_ymd_opt(year, month.month, 1)?;
    let (next_year, next_month) = if month.month == 12 {
        (year + 1, 1)
    } else {
        (year, month.month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;

    Some(MonthSpan { first, last })
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn explicit_year(text: &str) -> Option<i32> {
    tokens(text)
        .filter(|t| t.len() == 4 && t.chars().all(|c| c.is_ascii_digit()))
        .find_map(|t| t.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season() -> Season {
        Season::parse("2023-24").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fall_months_use_start_year() {
        let span = month_span("December", &season()).unwrap();
        assert_eq!(span.first, date(2023, 12, 1));
        assert_eq!(span.last, date(2023, 12, 31));
    }

    #[test]
    fn test_spring_months_use_end_year() {
        let span = month_span("april", &season()).unwrap();
        assert_eq!(span.first, date(2024, 4, 1));
        assert_eq!(span.last, date(2024, 4, 30));
    }

    #[test]
    fn test_february_is_leap_aware() {
        assert_eq!(month_span("february", &season()).unwrap().last, date(2024, 2, 29));

        let non_leap = Season::parse("2021-22").unwrap();
        assert_eq!(month_span("february", &non_leap).unwrap().last, date(2022, 2, 28));
    }

    #[test]
    fn test_explicit_year_overrides_rollover() {
        let bubble = Season::parse("2019-20").unwrap();
        let span = month_span("October 2020", &bubble).unwrap();
        assert_eq!(span.first, date(2020, 10, 1));

        let regular = month_span("October", &bubble).unwrap();
        assert_eq!(regular.first, date(2019, 10, 1));
    }

    #[test]
    fn test_non_month_text() {
        assert!(find_month("Playoffs").is_none());
        assert!(month_span("Schedule & Results", &season()).is_none());
    }
}
