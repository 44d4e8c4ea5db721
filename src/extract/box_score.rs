//! Box score pages: one basic stats table per team.

use scraper::{ElementRef, Html};

use crate::error::{AppError, Result};
use crate::extract::{element_text, parse_selector};
use crate::models::teams::{home_code_from_url, team_name};
use crate::models::{PlayerStatRow, StatLine};
use crate::utils::names::normalize_name;

/// Table ids look like `box-MIL-game-basic`.
const TEAM_TABLE: &str = r#"table[id$="-game-basic"]"#;
const CAPTION_SUFFIX: &str = " Basic and Advanced Stats Table";
const SKIPPED_ROWS: [&str; 2] = ["Team Totals", "Reserves"];
const DID_NOT_PLAY: &str = "Did Not Play";

/// Rows pulled from one box score page.
#[derive(Debug, Default)]
pub struct BoxScoreRows {
    pub rows: Vec<PlayerStatRow>,
    /// Player rows that did not fit the schema and were left out
    pub rejected: Vec<AppError>,
    /// Home team resolved from the page URL, if the code is known
    pub home_team: Option<&'static str>,
}

/// Extract every player row from a box score page.
///
/// `link` is the page URL; it names the home team and is copied into each
/// row along with `game_date`.
pub fn extract_player_rows(document: &Html, link: &str, game_date: &str) -> Result<BoxScoreRows> {
    let table_sel = parse_selector(TEAM_TABLE)?;
    let caption_sel = parse_selector("caption")?;
    let row_sel = parse_selector("tbody > tr")?;
    let header_sel = parse_selector("th")?;
    let cell_sel = parse_selector("td")?;
    let reason_sel = parse_selector(r#"td[data-stat="reason"]"#)?;

    let home_team = home_code_from_url(link).and_then(team_name);
    if home_team.is_none() {
        log::debug!("Home team unknown for {}", link);
    }

    let tables: Vec<(String, ElementRef<'_>)> = document
        .select(&table_sel)
        .filter_map(|table| {
            let caption = table.select(&caption_sel).next()?;
            Some((team_from_caption(&element_text(&caption)), table))
        })
        .collect();

    let mut out = BoxScoreRows {
        home_team,
        ..BoxScoreRows::default()
    };

    for (team, table) in &tables {
        let opponent = tables
            .iter()
            .map(|(name, _)| name.as_str())
            .find(|name| *name != team.as_str())
            .unwrap_or_default();
        if opponent.is_empty() {
            log::warn!("No opponent table for {} on {}", team, link);
        }
        let is_home = home_team == Some(team.as_str());

        for row in table.select(&row_sel) {
            let Some(header) = row.select(&header_sel).next() else {
                continue;
            };
            let raw_name = element_text(&header);
            if SKIPPED_ROWS.contains(&raw_name.as_str()) {
                continue;
            }

            let did_not_play = row
                .select(&reason_sel)
                .next()
                .is_some_and(|cell| element_text(&cell).contains(DID_NOT_PLAY));
            let stats = if did_not_play {
                StatLine::DidNotPlay
            } else {
                StatLine::Played(
                    row.select(&cell_sel)
                        .map(|cell| {
                            let text = element_text(&cell);
                            if text.is_empty() { "0".to_string() } else { text }
                        })
                        .collect(),
                )
            };

            match PlayerStatRow::new(
                game_date,
                normalize_name(&raw_name),
                team.as_str(),
                opponent,
                stats,
                link,
                is_home,
            ) {
                Ok(player_row) => out.rows.push(player_row),
                Err(e) => out.rejected.push(e),
            }
        }
    }

    Ok(out)
}

fn team_from_caption(caption: &str) -> String {
    caption
        .split(CAPTION_SUFFIX)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{COLUMNS, DNP};

    const LINK: &str = "https://www.basketball-reference.com/boxscores/202110190MIL.html";

    fn page() -> BoxScoreRows {
        let doc = Html::parse_document(include_str!("../../tests/fixtures/202110190MIL.html"));
        extract_player_rows(&doc, LINK, "2021-10-19").unwrap()
    }

    #[test]
    fn test_team_from_caption() {
        assert_eq!(
            team_from_caption("Milwaukee Bucks Basic and Advanced Stats Table"),
            "Milwaukee Bucks"
        );
        assert_eq!(team_from_caption("  Utah Jazz "), "Utah Jazz");
    }

    #[test]
    fn test_rows_for_both_teams() {
        let result = page();
        assert_eq!(result.home_team, Some("Milwaukee Bucks"));

        let brooklyn: Vec<_> = result
            .rows
            .iter()
            .filter(|r| r.team == "Brooklyn Nets")
            .collect();
        let milwaukee: Vec<_> = result
            .rows
            .iter()
            .filter(|r| r.team == "Milwaukee Bucks")
            .collect();

        assert_eq!(brooklyn.len(), 5);
        assert_eq!(milwaukee.len(), 4);
        assert!(brooklyn.iter().all(|r| r.opponent == "Milwaukee Bucks" && !r.home));
        assert!(milwaukee.iter().all(|r| r.opponent == "Brooklyn Nets" && r.home));
    }

    #[test]
    fn test_aggregate_rows_are_skipped() {
        let result = page();
        assert!(
            result
                .rows
                .iter()
                .all(|r| r.name != "Team Totals" && r.name != "Reserves")
        );
    }

    #[test]
    fn test_did_not_play_row_is_kept_with_sentinel() {
        let result = page();
        let row = result
            .rows
            .iter()
            .find(|r| r.name == "Kessler Edwards")
            .expect("DNP player present");

        assert!(row.did_not_play());
        let record = row.to_record();
        assert_eq!(record.len(), COLUMNS.len());
        assert!(record[4..25].iter().all(|c| c == DNP));
    }

    #[test]
    fn test_not_with_team_row_is_rejected() {
        let result = page();
        assert_eq!(result.rejected.len(), 1);
        assert!(matches!(
            &result.rejected[0],
            AppError::RowShape { player, .. } if player == "Kyrie Irving"
        ));
    }

    #[test]
    fn test_played_row_values() {
        let result = page();
        let giannis = result
            .rows
            .iter()
            .find(|r| r.name == "Giannis Antetokounmpo")
            .unwrap();
        let record = giannis.to_record();

        assert_eq!(record[0], "2021-10-19");
        assert_eq!(record[4], "36:09");
        assert_eq!(record[22], "32");
        assert_eq!(record[25], LINK);
        assert_eq!(record[26], "1");
    }

    #[test]
    fn test_empty_cells_become_zero() {
        let result = page();
        let griffin = result
            .rows
            .iter()
            .find(|r| r.name == "Blake Griffin")
            .unwrap();
        // No three point attempts, so 3P% is blank on the page.
        assert_eq!(griffin.to_record()[10], "0");
    }

    #[test]
    fn test_unknown_home_code_marks_everyone_away() {
        let doc = Html::parse_document(include_str!("../../tests/fixtures/202110190MIL.html"));
        let result =
            extract_player_rows(&doc, "https://example.com/boxscores/202110190ZZZ.html", "d")
                .unwrap();
        assert_eq!(result.home_team, None);
        assert!(result.rows.iter().all(|r| !r.home));
    }

    #[test]
    fn test_every_row_has_schema_length() {
        for row in page().rows {
            assert_eq!(row.to_record().len(), COLUMNS.len());
        }
    }
}
