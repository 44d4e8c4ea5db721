//! Schedule pages: the season index and the per-month game lists.

use chrono::NaiveDate;
use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::extract::{element_text, parse_selector};
use crate::models::calendar::find_month;
use crate::models::{BoxScoreRef, DateWindow, MonthLink};
use crate::utils::resolve_url;

/// Month navigation links from a season index page.
///
/// Only anchors inside the `div.filter` blocks whose text names a month are
/// kept, in page order. An index without such links yields an empty list.
pub fn extract_month_links(document: &Html, page_url: &str) -> Result<Vec<MonthLink>> {
    let anchor_sel = parse_selector("div.filter a[href]")?;
    let base = Url::parse(page_url)?;

    let links = document
        .select(&anchor_sel)
        .filter_map(|anchor| {
            let text = element_text(&anchor)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            find_month(&text)?;
            let href = anchor.value().attr("href")?;
            Some(MonthLink::new(text, resolve_url(&base, href)))
        })
        .collect();

    Ok(links)
}

/// Box score links for games inside `window` from one month page.
///
/// A row counts only when its date header carries a sortable `csk` value
/// starting with `YYYYMMDD`, that date is in the window, and the row links to
/// a box score. Everything else (headers, unplayed games, other dates) is
/// passed over without comment.
pub fn extract_box_score_refs(
    document: &Html,
    page_url: &str,
    window: &DateWindow,
) -> Result<Vec<BoxScoreRef>> {
    let row_sel = parse_selector("tr")?;
    let date_sel = parse_selector(r#"th[data-stat="date_game"]"#)?;
    let link_sel = parse_selector(r#"td[data-stat="box_score_text"] a[href]"#)?;
    let base = Url::parse(page_url)?;

    let mut refs = Vec::new();
    for row in document.select(&row_sel) {
        let Some(game_date) = row
            .select(&date_sel)
            .next()
            .and_then(|cell| cell.value().attr("csk"))
            .and_then(parse_sort_key)
        else {
            continue;
        };

        if !window.contains(game_date) {
            continue;
        }

        let Some(href) = row
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        refs.push(BoxScoreRef {
            url: resolve_url(&base, href),
            game_date,
        });
    }

    Ok(refs)
}

/// Parse the date part of a sort key such as `202110190MIL`.
fn parse_sort_key(csk: &str) -> Option<NaiveDate> {
    let digits = csk.get(..8)?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_URL: &str = "https://www.basketball-reference.com/leagues/NBA_2022_games.html";
    const OCTOBER_URL: &str =
        "https://www.basketball-reference.com/leagues/NBA_2022_games-october.html";

    fn fixture(name: &str) -> Html {
        let text = match name {
            "index" => include_str!("../../tests/fixtures/NBA_2022_games.html"),
            "october" => include_str!("../../tests/fixtures/NBA_2022_games-october.html"),
            _ => unreachable!(),
        };
        Html::parse_document(text)
    }

    #[test]
    fn test_month_links_from_index() {
        let links = extract_month_links(&fixture("index"), INDEX_URL).unwrap();
        let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["october", "november", "december"]);
        assert_eq!(links[0].url, OCTOBER_URL);
    }

    #[test]
    fn test_index_without_filter_is_empty() {
        let doc = Html::parse_document("<html><body><p>No games yet</p></body></html>");
        assert!(extract_month_links(&doc, INDEX_URL).unwrap().is_empty());
    }

    #[test]
    fn test_single_day_window_yields_one_game() {
        let window = DateWindow::parse("2021-10-19", "2021-10-19").unwrap();
        let refs = extract_box_score_refs(&fixture("october"), OCTOBER_URL, &window).unwrap();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].formatted_date(), "2021-10-19");
        assert_eq!(
            refs[0].url,
            "https://www.basketball-reference.com/boxscores/202110190MIL.html"
        );
    }

    #[test]
    fn test_rows_without_box_score_or_sort_key_are_skipped() {
        let window = DateWindow::parse("2021-10-01", "2021-10-31").unwrap();
        let refs = extract_box_score_refs(&fixture("october"), OCTOBER_URL, &window).unwrap();

        // The fixture also has an unplayed game and a row with a broken sort key.
        let dates: Vec<_> = refs.iter().map(|r| r.formatted_date()).collect();
        assert_eq!(dates, vec!["2021-10-19", "2021-10-20"]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(
            parse_sort_key("202110190MIL"),
            NaiveDate::from_ymd_opt(2021, 10, 19)
        );
        assert_eq!(parse_sort_key("2021"), None);
        assert_eq!(parse_sort_key("20211340XXX"), None);
    }
}
