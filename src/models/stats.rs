//! Per-player box score rows.

use crate::error::{AppError, Result};

/// Output schema, in column order.
pub const COLUMNS: [&str; 27] = [
    "Date", "Name", "Team", "Opponent", "MP", "FG", "FGA", "FG%", "3P", "3PA", "3P%", "FT", "FTA",
    "FT%", "ORB", "DRB", "TRB", "AST", "STL", "BLK", "TOV", "PF", "PTS", "GmSc", "+-", "GameLink",
    "Home",
];

/// Number of box score stat columns (`MP` through `+-`).
pub const STAT_COUNT: usize = 21;

/// Placeholder written to every stat column for a player who did not play.
pub const DNP: &str = "DNP";

/// The stat columns of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatLine {
    Played(Vec<String>),
    DidNotPlay,
}

impl StatLine {
    fn cells(&self) -> Vec<String> {
        match self {
            StatLine::Played(cells) => cells.clone(),
            StatLine::DidNotPlay => vec![DNP.to_string(); STAT_COUNT],
        }
    }
}

/// One player's line in one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatRow {
    pub date: String,
    pub name: String,
    pub team: String,
    pub opponent: String,
    pub stats: StatLine,
    pub game_link: String,
    pub home: bool,
}

impl PlayerStatRow {
    /// Assemble a row, checking the stat cells against the schema.
    ///
    /// A row whose stat cell count is not [`STAT_COUNT`] is rejected with
    /// [`AppError::RowShape`] rather than padded or truncated.
    pub fn new(
        date: impl Into<String>,
        name: impl Into<String>,
        team: impl Into<String>,
        opponent: impl Into<String>,
        stats: StatLine,
        game_link: impl Into<String>,
        home: bool,
    ) -> Result<Self> {
        let name = name.into();
        if let StatLine::Played(cells) = &stats {
            if cells.len() != STAT_COUNT {
                return Err(AppError::RowShape {
                    player: name,
                    found: cells.len() + COLUMNS.len() - STAT_COUNT,
                    expected: COLUMNS.len(),
                });
            }
        }

        Ok(Self {
            date: date.into(),
            name,
            team: team.into(),
            opponent: opponent.into(),
            stats,
            game_link: game_link.into(),
            home,
        })
    }

    pub fn did_not_play(&self) -> bool {
        matches!(self.stats, StatLine::DidNotPlay)
    }

    /// Flatten into the [`COLUMNS`] order.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(COLUMNS.len());
        record.push(self.date.clone());
        record.push(self.name.clone());
        record.push(self.team.clone());
        record.push(self.opponent.clone());
        record.extend(self.stats.cells());
        record.push(self.game_link.clone());
        record.push(if self.home { "1" } else { "0" }.to_string());
        record
    }

    /// Rebuild a row from a record in [`COLUMNS`] order.
    pub fn from_record(record: &[String]) -> Result<Self> {
        if record.len() != COLUMNS.len() {
            return Err(AppError::RowShape {
                player: record.get(1).cloned().unwrap_or_default(),
                found: record.len(),
                expected: COLUMNS.len(),
            });
        }

        let stat_cells = &record[4..4 + STAT_COUNT];
        let stats = if stat_cells.iter().all(|c| c == DNP) {
            StatLine::DidNotPlay
        } else {
            StatLine::Played(stat_cells.to_vec())
        };
        let home = match record[26].as_str() {
            "1" => true,
            "0" => false,
            other => {
                return Err(AppError::validation(format!(
                    "Home column must be 1 or 0, got '{other}'"
                )));
            }
        };

        Self::new(
            record[0].as_str(),
            record[1].as_str(),
            record[2].as_str(),
            record[3].as_str(),
            stats,
            record[25].as_str(),
            home,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played() -> StatLine {
        StatLine::Played((0..STAT_COUNT).map(|i| i.to_string()).collect())
    }

    #[test]
    fn test_schema_lengths_agree() {
        assert_eq!(COLUMNS.len(), 4 + STAT_COUNT + 2);
        assert_eq!(COLUMNS[4], "MP");
        assert_eq!(COLUMNS[24], "+-");
    }

    #[test]
    fn test_record_has_schema_length() {
        let row = PlayerStatRow::new("2021-10-19", "A", "B", "C", played(), "link", true).unwrap();
        let record = row.to_record();
        assert_eq!(record.len(), COLUMNS.len());
        assert_eq!(record[26], "1");
        assert_eq!(record[25], "link");
    }

    #[test]
    fn test_dnp_fills_every_stat_column() {
        let row =
            PlayerStatRow::new("2021-10-19", "A", "B", "C", StatLine::DidNotPlay, "link", false)
                .unwrap();
        let record = row.to_record();
        assert_eq!(record.len(), COLUMNS.len());
        assert!(record[4..25].iter().all(|c| c == DNP));
        assert_eq!(record[26], "0");
    }

    #[test]
    fn test_short_stat_line_is_rejected() {
        let stats = StatLine::Played(vec!["Did Not Dress".to_string()]);
        let err = PlayerStatRow::new("d", "Somebody", "B", "C", stats, "l", false).unwrap_err();
        match err {
            AppError::RowShape {
                player,
                found,
                expected,
            } => {
                assert_eq!(player, "Somebody");
                assert_eq!(found, 7);
                assert_eq!(expected, 27);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_record_recognises_dnp() {
        let row =
            PlayerStatRow::new("2021-10-19", "A", "B", "C", StatLine::DidNotPlay, "link", true)
                .unwrap();
        let back = PlayerStatRow::from_record(&row.to_record()).unwrap();
        assert!(back.did_not_play());
        assert_eq!(back, row);
    }

    #[test]
    fn test_from_record_rejects_bad_home_flag() {
        let mut record = PlayerStatRow::new("d", "A", "B", "C", played(), "l", true)
            .unwrap()
            .to_record();
        record[26] = "yes".to_string();
        assert!(PlayerStatRow::from_record(&record).is_err());
    }
}
