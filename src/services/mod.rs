//! Service layer for the scraper.
//!
//! Each service drives one fetch-bound stage of a run:
//! - Season index lookup (`MonthPageLocator`)
//! - Month selection by date window (`filter_months`)
//! - Box score link collection (`BoxScoreLinkExtractor`)
//! - Player row extraction (`PlayerStatExtractor`)

mod box_scores;
mod schedule;

pub use box_scores::{PlayerStatExtractor, PlayerStats};
pub use schedule::{BoxScoreLinkExtractor, MonthPageLocator, filter_months};
