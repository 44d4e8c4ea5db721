//! Pipeline entry points.
//!
//! - `run_scrape`: season index → month pages → box scores → rows
//! - `run_and_save`: the same, then a CSV snapshot in blob storage

pub mod scrape;

pub use scrape::{ScrapeRun, resolve_window, run_and_save, run_scrape};
