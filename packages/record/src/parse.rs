//! Reading record files back into fields.
//!
//! Normalization happens in a fixed order: section markers are stripped
//! (each acting as a line break), line break runs collapse to one space,
//! and only then is the text split on the `;##` delimiter. A `;` that is
//! not part of a delimiter is data and becomes `,`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{FIELD_COUNT, RawFields, RecordError};

/// Bracketed section marker plus surrounding horizontal whitespace.
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]*\[[^\[\]\r\n]*\][ \t]*").expect("section marker regex is valid")
});

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("line break regex is valid"));

/// Field delimiter after line breaks have collapsed to a space.
static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";## ?").expect("delimiter regex is valid"));

/// Strips section markers and collapses line breaks into single spaces.
#[must_use]
pub fn normalize_raw(raw: &str) -> String {
    let without_markers = SECTION_MARKER.replace_all(raw, "\n");
    LINE_BREAKS
        .replace_all(&without_markers, " ")
        .into_owned()
}

/// Normalizes raw record text and splits it into its seven fields.
///
/// # Errors
///
/// Returns [`RecordError::FieldCount`] if the text does not contain
/// exactly seven fields.
pub fn parse_fields(raw: &str) -> Result<RawFields, RecordError> {
    let normalized = normalize_raw(raw);
    let fields: Vec<String> = DELIMITER
        .split(&normalized)
        .map(|field| field.replace(';', ",").trim().to_owned())
        .collect();

    let [
        full_title,
        song_title,
        artist,
        release_date,
        pageviews,
        lyrics_state,
        lyrics,
    ]: [String; FIELD_COUNT] = fields
        .try_into()
        .map_err(|fields: Vec<String>| RecordError::FieldCount {
            found: fields.len(),
        })?;

    Ok(RawFields {
        full_title,
        song_title,
        artist,
        release_date,
        pageviews,
        lyrics_state,
        lyrics,
    })
}

/// Reads and splits one record file.
///
/// # Errors
///
/// Returns [`RecordError::Io`] if the file cannot be read as UTF-8 and
/// [`RecordError::Malformed`] if it does not have seven fields.
pub fn read_record_file(path: &Path) -> Result<RawFields, RecordError> {
    let raw = std::fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_fields(&raw).map_err(|e| match e {
        RecordError::FieldCount { found } => RecordError::Malformed {
            path: path.to_path_buf(),
            found,
        },
        other => other,
    })
}
