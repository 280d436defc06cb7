#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Song record, dataset row, and lyrics state types.
//!
//! A [`SongRecord`] is what the ingestion pipeline persists for every
//! scraped song. A [`SongRow`] is the typed, validated form of a record
//! after it has been read back from disk, and a [`Dataset`] is the full
//! collection of rows that analytics consumers work on.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Placeholder written to disk for optional provider fields that were
/// absent from the API response.
pub const MISSING: &str = "missing";

/// A provider song identifier together with the artist it was discovered
/// under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongReference {
    /// Provider-assigned song ID.
    pub song_id: u64,
    /// Provider-assigned ID of the primary artist.
    pub artist_id: u64,
}

/// Song metadata as returned by the lyrics API, before the lyrics text
/// has been scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongMetadata {
    /// Combined "title by artist" display title.
    pub full_title: String,
    /// Song title.
    pub title: String,
    /// Primary artist display name.
    pub artist_name: String,
    /// Release date as reported by the provider, if any.
    pub release_date: Option<String>,
    /// Page view count, if the provider reports one.
    pub pageviews: Option<u64>,
    /// Provider lyrics state (e.g. `"complete"`), if any.
    pub lyrics_state: Option<String>,
    /// Public web page holding the lyrics.
    pub url: String,
}

impl SongMetadata {
    /// Attaches scraped lyrics text, producing the record to persist.
    #[must_use]
    pub fn into_record(self, lyrics: String) -> SongRecord {
        SongRecord {
            full_title: self.full_title,
            title: self.title,
            artist_name: self.artist_name,
            release_date: self.release_date,
            pageviews: self.pageviews,
            lyrics_state: self.lyrics_state,
            lyrics,
        }
    }
}

/// One scraped song, exactly as persisted to its record file.
///
/// Optional fields are `None` when the provider omitted them; the record
/// file format writes those as [`MISSING`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Combined "title by artist" display title.
    pub full_title: String,
    /// Song title.
    pub title: String,
    /// Primary artist display name.
    pub artist_name: String,
    /// Release date as reported by the provider.
    pub release_date: Option<String>,
    /// Page view count.
    pub pageviews: Option<u64>,
    /// Provider lyrics state.
    pub lyrics_state: Option<String>,
    /// Raw lyrics text including section markers and line breaks.
    pub lyrics: String,
}

/// Completeness of a song's lyrics on the provider side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LyricsState {
    /// Lyrics are fully transcribed.
    Complete,
    /// Lyrics are partially transcribed.
    Incomplete,
    /// The song has not been released yet.
    Unreleased,
    /// The provider did not report a state.
    Missing,
    /// Any state value this crate does not know about.
    Unknown,
}

impl LyricsState {
    /// Maps a raw provider or file value onto the fixed category set.
    ///
    /// Blank values and the literal `None` count as [`Self::Missing`];
    /// anything unrecognised becomes [`Self::Unknown`].
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "None" {
            return Self::Missing;
        }
        value.parse().unwrap_or(Self::Unknown)
    }
}

/// A validated dataset row built from a [`SongRecord`] file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRow {
    /// Combined "title by artist" display title.
    pub full_title: String,
    /// Song title.
    pub song_title: String,
    /// Primary artist display name.
    pub artist: String,
    /// Release date. Rows without a resolvable date never exist.
    pub release_date: NaiveDate,
    /// Page views, `0` when the provider did not report any.
    pub pageviews: u64,
    /// Lyrics state category.
    pub lyrics_state: LyricsState,
    /// Normalized lyrics (markers stripped, line breaks collapsed).
    pub lyrics: String,
    /// Number of distinct case-folded word tokens in [`Self::lyrics`].
    pub words_used: u64,
}

/// The full typed dataset, ordered by release date, artist, then title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// All rows in dataset order.
    pub rows: Vec<SongRow>,
}

impl Dataset {
    /// Builds a dataset from rows in any order, applying the canonical
    /// ordering.
    #[must_use]
    pub fn from_rows(mut rows: Vec<SongRow>) -> Self {
        rows.sort_by(|a, b| {
            a.release_date
                .cmp(&b.release_date)
                .then_with(|| a.artist.cmp(&b.artist))
                .then_with(|| a.song_title.cmp(&b.song_title))
        });
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct artist names, sorted.
    #[must_use]
    pub fn artists(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|row| row.artist.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(artist: &str, title: &str, date: &str) -> SongRow {
        SongRow {
            full_title: format!("{title} by {artist}"),
            song_title: title.to_string(),
            artist: artist.to_string(),
            release_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            pageviews: 0,
            lyrics_state: LyricsState::Complete,
            lyrics: String::new(),
            words_used: 0,
        }
    }

    #[test]
    fn lyrics_state_maps_known_values() {
        assert_eq!(LyricsState::from_raw("complete"), LyricsState::Complete);
        assert_eq!(LyricsState::from_raw("Unreleased"), LyricsState::Unreleased);
        assert_eq!(LyricsState::from_raw(" incomplete "), LyricsState::Incomplete);
    }

    #[test]
    fn lyrics_state_maps_sentinels_to_missing() {
        assert_eq!(LyricsState::from_raw(MISSING), LyricsState::Missing);
        assert_eq!(LyricsState::from_raw("None"), LyricsState::Missing);
        assert_eq!(LyricsState::from_raw(""), LyricsState::Missing);
    }

    #[test]
    fn lyrics_state_maps_unexpected_values_to_unknown() {
        assert_eq!(LyricsState::from_raw("pending_review"), LyricsState::Unknown);
        assert_eq!(LyricsState::Unknown.to_string(), "unknown");
    }

    #[test]
    fn metadata_into_record_keeps_optional_fields() {
        let metadata = SongMetadata {
            full_title: "Chandelier by Sia".to_string(),
            title: "Chandelier".to_string(),
            artist_name: "Sia".to_string(),
            release_date: Some("2014-03-17".to_string()),
            pageviews: None,
            lyrics_state: Some("complete".to_string()),
            url: "https://genius.com/Sia-chandelier-lyrics".to_string(),
        };
        let record = metadata.into_record("Party girls".to_string());
        assert_eq!(record.title, "Chandelier");
        assert_eq!(record.pageviews, None);
        assert_eq!(record.lyrics, "Party girls");
    }

    #[test]
    fn dataset_orders_rows_by_date_then_artist_then_title() {
        let dataset = Dataset::from_rows(vec![
            row("Sia", "Elastic Heart", "2014-03-17"),
            row("Adele", "Hello", "2015-10-23"),
            row("Sia", "Chandelier", "2014-03-17"),
            row("Beyonce", "Halo", "2008-01-20"),
        ]);
        let titles: Vec<&str> = dataset.rows.iter().map(|r| r.song_title.as_str()).collect();
        assert_eq!(titles, ["Halo", "Chandelier", "Elastic Heart", "Hello"]);
        assert_eq!(dataset.artists().len(), 3);
    }
}
