#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed lyrics dataset.
//!
//! Reads every record file in the lyrics directory, types the fields
//! into [`SongRow`]s, drops rows that cannot be typed, and orders the
//! result. The [`cache`] module keeps a serialized copy of the dataset so
//! consumers do not re-parse every file on each start.

pub mod cache;
pub mod words;

use std::path::{Path, PathBuf};

use atemlos_record::{RawFields, RecordError};
use atemlos_song_models::{Dataset, LyricsState, MISSING, SongRow};
use chrono::{DateTime, NaiveDate};

pub use cache::{invalidate, load_or_build, rebuild};

/// Errors that can occur while building or caching the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The lyrics directory could not be listed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The dataset could not be serialized.
    #[error("Failed to encode dataset: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Reading, writing, or deleting the cached blob failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Blob path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Why a record could not become a dataset row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// The release date is absent or not a calendar date.
    #[error("unresolved release date '{0}'")]
    ReleaseDate(String),

    /// The page view count is present but not a number.
    #[error("invalid pageviews '{0}'")]
    Pageviews(String),
}

/// Returns `true` for the values that stand for an absent field.
fn is_absent(value: &str) -> bool {
    value.is_empty() || value == MISSING || value == "None"
}

/// Parses `YYYY-MM-DD` or the date part of an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`RowError::ReleaseDate`] for absent or unparseable values.
pub fn parse_release_date(value: &str) -> Result<NaiveDate, RowError> {
    let value = value.trim();
    if is_absent(value) {
        return Err(RowError::ReleaseDate(value.to_owned()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| RowError::ReleaseDate(value.to_owned()))
}

/// Parses a page view count, treating absent values as `0`.
///
/// # Errors
///
/// Returns [`RowError::Pageviews`] for values that are neither absent nor
/// an unsigned integer.
pub fn parse_pageviews(value: &str) -> Result<u64, RowError> {
    let value = value.trim();
    if is_absent(value) {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| RowError::Pageviews(value.to_owned()))
}

/// Types one record's fields into a row.
///
/// # Errors
///
/// Returns [`RowError`] if the release date or page views cannot be
/// typed.
pub fn build_row(fields: RawFields) -> Result<SongRow, RowError> {
    let release_date = parse_release_date(&fields.release_date)?;
    let pageviews = parse_pageviews(&fields.pageviews)?;
    let words_used = words::words_used(&fields.lyrics);

    Ok(SongRow {
        full_title: fields.full_title,
        song_title: fields.song_title,
        artist: fields.artist,
        release_date,
        pageviews,
        lyrics_state: LyricsState::from_raw(&fields.lyrics_state),
        lyrics: fields.lyrics,
        words_used,
    })
}

/// Reads and types a single record file, logging and returning `None`
/// when it has to be dropped.
fn load_row(path: &Path) -> Option<SongRow> {
    let fields = match atemlos_record::read_record_file(path) {
        Ok(fields) => fields,
        Err(e) => {
            log::warn!("Dropping record: {e}");
            return None;
        }
    };

    match build_row(fields) {
        Ok(row) => Some(row),
        Err(e) => {
            log::warn!("Dropping {}: {e}", path.display());
            None
        }
    }
}

/// Builds the dataset from every record file in `lyrics_dir`.
///
/// Files that cannot be read, split, or typed are dropped with a warning.
///
/// # Errors
///
/// Returns [`DatasetError::Record`] if the directory cannot be listed.
pub fn load_dataset(lyrics_dir: &Path) -> Result<Dataset, DatasetError> {
    let files = atemlos_record::list_record_files(lyrics_dir)?;
    let total = files.len();

    let rows: Vec<SongRow> = files.iter().filter_map(|path| load_row(path)).collect();

    log::info!(
        "Loaded {} rows from {total} record files in {} ({} dropped)",
        rows.len(),
        lyrics_dir.display(),
        total - rows.len()
    );

    Ok(Dataset::from_rows(rows))
}
