#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ingestion configuration, progress, and run summary types.

pub mod progress;

use std::path::PathBuf;
use std::time::Duration;

use atemlos_song_models::SongReference;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Configuration for one ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Artist display names to scrape, in order.
    pub artists: Vec<String>,
    /// Song IDs requested per enumeration page.
    pub songs_per_page: u32,
    /// Highest enumeration page fetched per artist.
    pub max_pages: u32,
    /// Pause after every song request.
    pub delay: Duration,
    /// Directory where record files are written.
    pub lyrics_dir: PathBuf,
    /// Directory where the run log is written.
    pub logs_dir: PathBuf,
}

/// A song that could not be fetched, scraped, or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSong {
    /// The song as enumerated.
    pub song: SongReference,
    /// Display name of the artist the song was enumerated under.
    pub artist: String,
    /// Error message.
    pub reason: String,
}

/// An artist whose song enumeration failed part way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedArtist {
    /// Artist display name.
    pub artist: String,
    /// Error message.
    pub reason: String,
}

/// Outcome of a completed ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Local time the run started.
    pub started_at: DateTime<Local>,
    /// Local time the run finished.
    pub finished_at: DateTime<Local>,
    /// Configured pause between song requests.
    pub delay: Duration,
    /// Number of artists whose provider ID was resolved.
    pub artists_processed: u64,
    /// Number of record files written.
    pub songs_written: u64,
    /// Artist names the provider search did not resolve.
    pub not_found: Vec<String>,
    /// Artists abandoned after an enumeration failure.
    pub failed_artists: Vec<FailedArtist>,
    /// Songs skipped after an error.
    pub failed_songs: Vec<FailedSong>,
}

impl RunSummary {
    /// Creates an empty summary for a run starting now.
    #[must_use]
    pub fn start(delay: Duration) -> Self {
        let now = Local::now();
        Self {
            started_at: now,
            finished_at: now,
            delay,
            artists_processed: 0,
            songs_written: 0,
            not_found: Vec::new(),
            failed_artists: Vec::new(),
            failed_songs: Vec::new(),
        }
    }

    /// Wall-clock run time.
    #[must_use]
    pub fn duration(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }

    /// Songs written per artist, `None` when no artist was processed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_songs_per_artist(&self) -> Option<f64> {
        (self.artists_processed > 0)
            .then(|| self.songs_written as f64 / self.artists_processed as f64)
    }

    /// Run time per written song, `None` when nothing was written.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_per_song(&self) -> Option<Duration> {
        (self.songs_written > 0).then(|| {
            Duration::from_secs_f64(self.duration().as_secs_f64() / self.songs_written as f64)
        })
    }
}
