//! Team abbreviation table used to identify the home side of a box score.

/// Site abbreviation → full team name as it appears in box score captions.
pub static TEAM_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BRK", "Brooklyn Nets"),
    ("CHO", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("DET", "Detroit Pistons"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("IND", "Indiana Pacers"),
    ("LAC", "Los Angeles Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("NYK", "New York Knicks"),
    ("OKC", "Oklahoma City Thunder"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("PHO", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("TOR", "Toronto Raptors"),
    ("UTA", "Utah Jazz"),
    ("WAS", "Washington Wizards"),
    // Former franchise codes
    ("CHA", "Charlotte Bobcats"),
    ("CHH", "Charlotte Hornets"),
    ("NJN", "New Jersey Nets"),
    ("NOH", "New Orleans Hornets"),
    ("NOK", "New Orleans/Oklahoma City Hornets"),
    ("SEA", "Seattle SuperSonics"),
    ("VAN", "Vancouver Grizzlies"),
    ("WSB", "Washington Bullets"),
];

/// Look up a team by its three-letter code (case-insensitive).
pub fn team_name(abbreviation: &str) -> Option<&'static str> {
    TEAM_ABBREVIATIONS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(abbreviation))
        .map(|(_, name)| *name)
}

/// Home team code from a box score URL.
///
/// Box score files are named `YYYYMMDD0XXX.html`, where `XXX` is the home
/// team, e.g. `.../boxscores/202310240DEN.html`.
pub fn home_code_from_url(url: &str) -> Option<&str> {
    let file = url.rsplit('/').next()?;
    let stem = file.split('.').next()?;
    let start = stem.len().checked_sub(3)?;
    stem.get(start..)
}
