//! Page extractors.
//!
//! Each extractor turns one kind of parsed page into domain values and knows
//! nothing about fetching. All assumptions about the site's markup (filter
//! blocks, `data-stat` attributes, table id suffixes, caption wording) live
//! here.

pub mod box_score;
pub mod schedule;

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

pub use box_score::{BoxScoreRows, extract_player_rows};
pub use schedule::{extract_box_score_refs, extract_month_links};

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collected, whitespace-trimmed text of an element.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("div.filter a[href]").is_ok());
        assert!(parse_selector(r#"table[id$="-game-basic"]"#).is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(matches!(
            parse_selector("[[invalid"),
            Err(AppError::Selector { .. })
        ));
    }
}
