//! Genius API response shapes.
//!
//! Only the fields this crate reads are declared; `serde` ignores the
//! rest. Every response is wrapped as `{"meta": {...}, "response": {...}}`.

use serde::Deserialize;

/// Outer envelope shared by all endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Endpoint-specific payload.
    pub response: T,
}

/// `GET /search` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Search hits in provider ranking order.
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// The song this hit refers to.
    pub result: SearchResult,
}

/// The song part of a search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Primary artist of the matched song.
    pub primary_artist: ArtistRef,
}

/// Minimal artist reference embedded in song objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    /// Provider artist ID.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// `GET /artists/{id}/songs` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSongsResponse {
    /// Songs on this page.
    #[serde(default)]
    pub songs: Vec<SongSummary>,
    /// Next page number, `null` once enumeration is exhausted.
    pub next_page: Option<u32>,
}

/// A song as listed on an artist's song page.
#[derive(Debug, Clone, Deserialize)]
pub struct SongSummary {
    /// Provider song ID.
    pub id: u64,
    /// Primary artist (features list the other artist here).
    pub primary_artist: ArtistRef,
}

/// `GET /songs/{id}` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SongResponse {
    /// The requested song.
    pub song: SongDetail,
}

/// Full song object.
#[derive(Debug, Clone, Deserialize)]
pub struct SongDetail {
    /// "Title by Artist".
    pub full_title: String,
    /// Song title.
    pub title: String,
    /// Primary artist.
    pub primary_artist: ArtistRef,
    /// Public lyrics page.
    pub url: String,
    /// Release date (`YYYY-MM-DD`), absent or `null` when unknown.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Lyrics completeness state.
    #[serde(default)]
    pub lyrics_state: Option<String>,
    /// Popularity counters.
    #[serde(default)]
    pub stats: Option<SongStats>,
}

/// Song popularity counters.
#[derive(Debug, Clone, Deserialize)]
pub struct SongStats {
    /// Page views; omitted by the provider below a popularity threshold.
    #[serde(default)]
    pub pageviews: Option<u64>,
}
