// src/export.rs

//! CSV snapshots of scraped rows.
//!
//! A snapshot is a CSV of [`PlayerStatRow`]s named
//! `{prefix}_{season}_{YYYYMMDDHHMMSS}.csv`, stored next to a JSON run
//! summary with the same stem. Downstream consumers pick the newest CSV by
//! the trailing timestamp, so names must keep that shape.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{COLUMNS, PlayerStatRow, ScrapeStats, Season};
use crate::storage::BlobStore;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const CSV_EXT: &str = ".csv";

/// Encode rows as CSV with a header line.
pub fn to_csv(rows: &[PlayerStatRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

/// Decode a snapshot, checking the header and every record's shape.
pub fn from_csv(bytes: &[u8]) -> Result<Vec<PlayerStatRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?;
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(AppError::validation(format!(
            "Unexpected CSV header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    reader
        .records()
        .map(|record| {
            let fields: Vec<String> = record?.iter().map(String::from).collect();
            PlayerStatRow::from_record(&fields)
        })
        .collect()
}

/// Snapshot file name for a run finished at `timestamp`.
pub fn snapshot_name(prefix: &str, season: &Season, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}{}",
        prefix,
        season.label(),
        timestamp.format(TIMESTAMP_FORMAT),
        CSV_EXT
    )
}

/// Name of the run summary stored alongside a snapshot.
pub fn stats_name(snapshot: &str) -> String {
    format!("{}.json", snapshot.strip_suffix(CSV_EXT).unwrap_or(snapshot))
}

/// Trailing timestamp of a snapshot name, if it has one.
fn snapshot_timestamp(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_suffix(CSV_EXT)?;
    let (_, stamp) = stem.rsplit_once('_')?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

/// Write a snapshot and its run summary.
pub async fn save_snapshot(
    store: &dyn BlobStore,
    bucket: &str,
    name: &str,
    rows: &[PlayerStatRow],
    stats: &ScrapeStats,
) -> Result<()> {
    let csv = to_csv(rows)?;
    store.put(bucket, name, csv).await?;

    let summary = serde_json::to_vec_pretty(stats)?;
    store.put(bucket, &stats_name(name), summary).await?;

    log::info!("Saved {} rows to {}/{}", rows.len(), bucket, name);
    Ok(())
}

/// Name of the newest snapshot in `bucket`.
pub async fn latest_snapshot_name(store: &dyn BlobStore, bucket: &str) -> Result<Option<String>> {
    let names = store.list(bucket).await?;
    Ok(names
        .into_iter()
        .filter_map(|name| snapshot_timestamp(&name).map(|ts| (ts, name)))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, name)| name))
}

/// Load the newest snapshot in `bucket`.
pub async fn latest_snapshot(
    store: &dyn BlobStore,
    bucket: &str,
) -> Result<Option<(String, Vec<PlayerStatRow>)>> {
    let Some(name) = latest_snapshot_name(store, bucket).await? else {
        return Ok(None);
    };
    let bytes = store
        .get(bucket, &name)
        .await?
        .ok_or_else(|| AppError::validation(format!("Snapshot {} vanished while loading", name)))?;
    let rows = from_csv(&bytes)?;
    Ok(Some((name, rows)))
}
