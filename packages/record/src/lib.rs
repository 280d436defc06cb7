#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Song record files.
//!
//! Every scraped song is stored as one UTF-8 text file holding seven
//! fields joined by [`FIELD_SEPARATOR`]. This crate owns both directions
//! of that format: [`write_record`] produces a file from a
//! [`SongRecord`], and [`parse::read_record_file`] turns a file back into
//! seven trimmed [`RawFields`] strings for the dataset loader to type.

pub mod parse;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use atemlos_song_models::{MISSING, SongRecord};
use regex::Regex;

pub use parse::{normalize_raw, parse_fields, read_record_file};

/// Separator written between consecutive fields.
pub const FIELD_SEPARATOR: &str = ";##\n";

/// Number of fields in every record.
pub const FIELD_COUNT: usize = 7;

/// Column names in file order.
pub const COLUMNS: [&str; FIELD_COUNT] = [
    "FullTitle",
    "SongTitle",
    "Artist",
    "ReleaseDate",
    "Pageviews",
    "LyricsState",
    "Lyrics",
];

/// Runs of characters that cannot appear in a file name.
static PATH_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\\x00]+").expect("path-unsafe regex is valid"));

/// Errors that can occur while reading or writing record files.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Reading or writing a record file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The text did not split into [`FIELD_COUNT`] fields.
    #[error("expected 7 fields, found {found}")]
    FieldCount {
        /// Number of fields actually found.
        found: usize,
    },

    /// A record file did not split into [`FIELD_COUNT`] fields.
    #[error("{}: expected 7 fields, found {found}", .path.display())]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// Number of fields actually found.
        found: usize,
    },
}

/// The seven fields of a record file after normalization, still untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    /// "Title by Artist".
    pub full_title: String,
    /// Song title.
    pub song_title: String,
    /// Primary artist name.
    pub artist: String,
    /// Release date text, possibly [`MISSING`].
    pub release_date: String,
    /// Page view text, possibly [`MISSING`].
    pub pageviews: String,
    /// Lyrics state text, possibly [`MISSING`].
    pub lyrics_state: String,
    /// Normalized lyrics.
    pub lyrics: String,
}

/// File name for a song: `"{artist}_{title}.txt"` with path-unsafe runs
/// replaced by a single space.
#[must_use]
pub fn record_file_name(artist: &str, title: &str) -> String {
    let artist = PATH_UNSAFE.replace_all(artist, " ");
    let title = PATH_UNSAFE.replace_all(title, " ");
    format!("{artist}_{title}.txt")
}

/// Renders a record in the on-disk format, with [`MISSING`] standing in
/// for absent optional fields.
#[must_use]
pub fn format_record(record: &SongRecord) -> String {
    let pageviews = record
        .pageviews
        .map_or_else(|| MISSING.to_owned(), |views| views.to_string());

    let fields = [
        record.full_title.as_str(),
        record.title.as_str(),
        record.artist_name.as_str(),
        record.release_date.as_deref().unwrap_or(MISSING),
        pageviews.as_str(),
        record.lyrics_state.as_deref().unwrap_or(MISSING),
        record.lyrics.as_str(),
    ];

    let mut text = fields.join(FIELD_SEPARATOR);
    text.push('\n');
    text
}

/// Writes `record` into `dir`, creating the directory if needed and
/// overwriting any previous file for the same song.
///
/// # Errors
///
/// Returns [`RecordError::Io`] if the directory or file cannot be written.
pub fn write_record(dir: &Path, record: &SongRecord) -> Result<PathBuf, RecordError> {
    std::fs::create_dir_all(dir).map_err(|source| RecordError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(record_file_name(&record.artist_name, &record.title));
    std::fs::write(&path, format_record(record)).map_err(|source| RecordError::Io {
        path: path.clone(),
        source,
    })?;

    log::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Lists the `*.txt` record files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`RecordError::Io`] if the directory cannot be read.
pub fn list_record_files(dir: &Path) -> Result<Vec<PathBuf>, RecordError> {
    let io_err = |source| RecordError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
