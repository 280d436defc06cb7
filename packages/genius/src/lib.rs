#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Genius lyrics API client.
//!
//! Provides the [`LyricsApi`] trait used by the ingestion pipeline and the
//! [`client::GeniusClient`] implementation that talks to
//! `https://api.genius.com` with a static bearer token.
//!
//! Response decoding lives in plain functions ([`match_artist_id`],
//! [`primary_song_page`], [`song_metadata`]) over the [`dto`] types so it
//! can be exercised without a network.

pub mod client;
pub mod dto;

use async_trait::async_trait;
use atemlos_song_models::{SongMetadata, SongReference};
use serde::de::DeserializeOwned;

pub use client::GeniusClient;

/// Errors that can occur while talking to the lyrics API.
#[derive(Debug, thiserror::Error)]
pub enum GeniusError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path that was requested.
        endpoint: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// One page of songs for an artist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongIdPage {
    /// Songs on this page whose primary artist is the queried one.
    pub songs: Vec<SongReference>,
    /// Page to request next, `None` once enumeration is exhausted.
    pub next_page: Option<u32>,
}

/// Read-only operations the ingestion pipeline needs from a lyrics
/// provider.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    /// Finds the provider ID of the first search hit whose primary artist
    /// name contains `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GeniusError`] if the request or decoding fails.
    async fn resolve_artist_id(&self, name: &str) -> Result<Option<u64>, GeniusError>;

    /// Fetches one page of an artist's songs sorted by popularity,
    /// keeping only songs where `artist_id` is the primary artist.
    ///
    /// # Errors
    ///
    /// Returns [`GeniusError`] if the request or decoding fails.
    async fn song_ids_page(
        &self,
        artist_id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<SongIdPage, GeniusError>;

    /// Fetches a song's metadata and lyrics page URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeniusError`] if the request fails or a required field is
    /// missing. Optional fields never cause an error.
    async fn song_data(&self, song_id: u64) -> Result<SongMetadata, GeniusError>;
}

/// Decodes an enveloped JSON body into its payload.
///
/// # Errors
///
/// Returns [`GeniusError::Decode`] if the body does not match `T`.
pub fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, GeniusError> {
    serde_json::from_str::<dto::Envelope<T>>(body)
        .map(|envelope| envelope.response)
        .map_err(|source| GeniusError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
}

/// Returns the ID of the first hit whose primary artist name contains
/// `name` (case-sensitive). A blank name matches nothing.
#[must_use]
pub fn match_artist_id(response: &dto::SearchResponse, name: &str) -> Option<u64> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    response
        .hits
        .iter()
        .map(|hit| &hit.result.primary_artist)
        .find(|artist| artist.name.contains(name))
        .map(|artist| artist.id)
}

/// Keeps the songs whose primary artist is exactly `artist_id`.
#[must_use]
pub fn primary_song_page(response: dto::ArtistSongsResponse, artist_id: u64) -> SongIdPage {
    let songs = response
        .songs
        .into_iter()
        .filter(|song| song.primary_artist.id == artist_id)
        .map(|song| SongReference {
            song_id: song.id,
            artist_id,
        })
        .collect();

    SongIdPage {
        songs,
        next_page: response.next_page,
    }
}

/// Converts a song detail object into [`SongMetadata`].
#[must_use]
pub fn song_metadata(song: dto::SongDetail) -> SongMetadata {
    SongMetadata {
        full_title: song.full_title,
        title: song.title,
        artist_name: song.primary_artist.name,
        release_date: song.release_date,
        pageviews: song.stats.and_then(|stats| stats.pageviews),
        lyrics_state: song.lyrics_state,
        url: song.url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "meta": {"status": 200},
        "response": {"hits": [
            {"type": "song", "result": {"id": 1, "primary_artist": {"id": 111, "name": "David Guetta"}}},
            {"type": "song", "result": {"id": 2, "primary_artist": {"id": 16775, "name": "Sia"}}},
            {"type": "song", "result": {"id": 3, "primary_artist": {"id": 222, "name": "Sia & Diplo"}}}
        ]}
    }"#;

    #[test]
    fn resolves_first_substring_match() {
        let response: dto::SearchResponse = decode("/search", SEARCH_BODY).unwrap();
        assert_eq!(match_artist_id(&response, "Sia"), Some(16775));
        assert_eq!(match_artist_id(&response, "Diplo"), Some(222));
    }

    #[test]
    fn artist_match_is_case_sensitive() {
        let response: dto::SearchResponse = decode("/search", SEARCH_BODY).unwrap();
        assert_eq!(match_artist_id(&response, "sia"), None);
        assert_eq!(match_artist_id(&response, "Adele"), None);
    }

    #[test]
    fn blank_name_matches_nothing() {
        let response: dto::SearchResponse = decode("/search", SEARCH_BODY).unwrap();
        assert_eq!(match_artist_id(&response, ""), None);
        assert_eq!(match_artist_id(&response, "   "), None);
    }

    #[test]
    fn empty_search_has_no_match() {
        let response: dto::SearchResponse =
            decode("/search", r#"{"meta": {"status": 200}, "response": {"hits": []}}"#).unwrap();
        assert_eq!(match_artist_id(&response, "Sia"), None);
    }

    #[test]
    fn filters_songs_to_primary_artist() {
        let body = r#"{"response": {
            "songs": [
                {"id": 378195, "primary_artist": {"id": 16775, "name": "Sia"}},
                {"id": 90000, "primary_artist": {"id": 111, "name": "David Guetta"}},
                {"id": 520000, "primary_artist": {"id": 16775, "name": "Sia"}}
            ],
            "next_page": 2
        }}"#;
        let response: dto::ArtistSongsResponse = decode("/artists/16775/songs", body).unwrap();
        let page = primary_song_page(response, 16775);
        let ids: Vec<u64> = page.songs.iter().map(|song| song.song_id).collect();
        assert_eq!(ids, [378_195, 520_000]);
        assert!(page.songs.iter().all(|song| song.artist_id == 16775));
        assert_eq!(page.next_page, Some(2));
    }

    #[test]
    fn last_page_has_no_next_page() {
        let body = r#"{"response": {"songs": [], "next_page": null}}"#;
        let response: dto::ArtistSongsResponse = decode("/artists/1/songs", body).unwrap();
        assert_eq!(primary_song_page(response, 1), SongIdPage::default());
    }

    #[test]
    fn song_metadata_reads_all_fields() {
        let body = r#"{"response": {"song": {
            "full_title": "Chandelier by Sia",
            "title": "Chandelier",
            "primary_artist": {"id": 16775, "name": "Sia"},
            "url": "https://genius.com/Sia-chandelier-lyrics",
            "release_date": "2014-03-17",
            "lyrics_state": "complete",
            "stats": {"hot": false, "pageviews": 3120000}
        }}}"#;
        let response: dto::SongResponse = decode("/songs/378195", body).unwrap();
        let metadata = song_metadata(response.song);
        assert_eq!(metadata.full_title, "Chandelier by Sia");
        assert_eq!(metadata.artist_name, "Sia");
        assert_eq!(metadata.release_date.as_deref(), Some("2014-03-17"));
        assert_eq!(metadata.pageviews, Some(3_120_000));
        assert_eq!(metadata.lyrics_state.as_deref(), Some("complete"));
        assert_eq!(metadata.url, "https://genius.com/Sia-chandelier-lyrics");
    }

    #[test]
    fn song_metadata_tolerates_missing_optional_fields() {
        let body = r#"{"response": {"song": {
            "full_title": "Demo by Sia",
            "title": "Demo",
            "primary_artist": {"id": 16775, "name": "Sia"},
            "url": "https://genius.com/Sia-demo-lyrics",
            "release_date": null,
            "stats": {"hot": false}
        }}}"#;
        let response: dto::SongResponse = decode("/songs/1", body).unwrap();
        let metadata = song_metadata(response.song);
        assert_eq!(metadata.release_date, None);
        assert_eq!(metadata.pageviews, None);
        assert_eq!(metadata.lyrics_state, None);
    }

    #[test]
    fn song_without_required_fields_is_a_decode_error() {
        let body = r#"{"response": {"song": {"title": "Demo"}}}"#;
        let err = decode::<dto::SongResponse>("/songs/1", body).unwrap_err();
        assert!(matches!(err, GeniusError::Decode { ref endpoint, .. } if endpoint == "/songs/1"));
    }

    #[test]
    fn error_bodies_are_decode_errors() {
        let body = r#"{"meta": {"status": 401, "message": "invalid token"}}"#;
        assert!(decode::<dto::SearchResponse>("/search", body).is_err());
    }
}
