#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lyrics ingestion pipeline.
//!
//! For every configured artist the pipeline resolves the provider artist
//! ID, pages through the artist's songs sorted by popularity, fetches
//! each song's metadata, scrapes the lyrics page, and writes one record
//! file per song. Work is strictly sequential with a fixed pause after
//! every song.
//!
//! Failures below the artist level never abort a run: they are logged,
//! collected in the [`RunSummary`], and written to the run log.

pub mod run_log;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use atemlos_genius::{GeniusError, LyricsApi};
use atemlos_ingest_models::progress::ProgressCallback;
use atemlos_ingest_models::{FailedArtist, FailedSong, IngestConfig, RunSummary};
use atemlos_record::RecordError;
use atemlos_scraper::{LyricsScraper, ScrapeError};
use atemlos_song_models::SongReference;
use chrono::Local;

/// Errors that can occur during ingestion.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// No artist names were supplied.
    #[error("No artists to ingest")]
    NoArtists,

    /// A lyrics API request failed.
    #[error("Lyrics API error: {0}")]
    Api(#[from] GeniusError),

    /// Scraping a lyrics page failed.
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Writing a record file failed.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Writing the run log failed.
    #[error("Failed to write run log {}: {source}", .path.display())]
    RunLog {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Runs a full ingestion pass and writes the run log.
///
/// # Errors
///
/// Returns [`IngestError::NoArtists`] for an empty artist list and
/// [`IngestError::RunLog`] if the run log cannot be written. Per-song and
/// per-artist failures are recorded in the returned [`RunSummary`]
/// instead.
pub async fn run_ingest(
    api: &dyn LyricsApi,
    scraper: &dyn LyricsScraper,
    config: &IngestConfig,
    progress: Arc<dyn ProgressCallback>,
) -> Result<RunSummary, IngestError> {
    if config.artists.is_empty() {
        return Err(IngestError::NoArtists);
    }

    let mut summary = RunSummary::start(config.delay);
    log::info!(
        "Starting ingestion of {} artists ({} songs per page, up to {} pages, {}s delay)",
        config.artists.len(),
        config.songs_per_page,
        config.max_pages,
        config.delay.as_secs_f64()
    );

    progress.set_total(config.artists.len() as u64);

    for artist in &config.artists {
        progress.set_message(artist.clone());
        ingest_artist(api, scraper, config, artist, progress.as_ref(), &mut summary).await;
        progress.inc(1);
    }

    summary.finished_at = Local::now();
    let log_path = run_log::write_run_log(&config.logs_dir, &summary)?;

    progress.finish(format!(
        "{} songs from {} artists",
        summary.songs_written, summary.artists_processed
    ));
    log::info!(
        "Ingestion finished: {} songs written, {} artists not found, {} songs failed (log: {})",
        summary.songs_written,
        summary.not_found.len(),
        summary.failed_songs.len(),
        log_path.display()
    );

    Ok(summary)
}

/// Ingests every song of one artist, recording outcomes in `summary`.
async fn ingest_artist(
    api: &dyn LyricsApi,
    scraper: &dyn LyricsScraper,
    config: &IngestConfig,
    artist: &str,
    progress: &dyn ProgressCallback,
    summary: &mut RunSummary,
) {
    if artist.trim().is_empty() {
        log::warn!("Skipping blank artist name");
        summary.not_found.push(artist.to_owned());
        return;
    }

    let artist_id = match api.resolve_artist_id(artist).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            log::warn!("Artist '{artist}' not found");
            summary.not_found.push(artist.to_owned());
            return;
        }
        Err(e) => {
            log::error!("Failed to resolve artist '{artist}': {e}");
            summary.failed_artists.push(FailedArtist {
                artist: artist.to_owned(),
                reason: e.to_string(),
            });
            return;
        }
    };

    summary.artists_processed += 1;
    log::info!("Artist '{artist}' resolved to ID {artist_id}");

    let mut next_page = Some(1);
    while let Some(page) = next_page.filter(|page| *page <= config.max_pages) {
        let song_page = match api
            .song_ids_page(artist_id, config.songs_per_page, page)
            .await
        {
            Ok(song_page) => song_page,
            Err(e) => {
                log::error!("Failed to list songs of '{artist}' (page {page}): {e}");
                summary.failed_artists.push(FailedArtist {
                    artist: artist.to_owned(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        for song in song_page.songs {
            let song_id = song.song_id;
            progress.set_message(format!("{artist}: song {song_id} (page {page})"));
            log::info!("Scraping song {song_id} of '{artist}' (page {page})");

            match ingest_song(api, scraper, &config.lyrics_dir, song).await {
                Ok(path) => {
                    summary.songs_written += 1;
                    log::debug!("Song {song_id} written to {}", path.display());
                }
                Err(e) => {
                    log::error!("Skipping song {song_id} of '{artist}': {e}");
                    summary.failed_songs.push(FailedSong {
                        song,
                        artist: artist.to_owned(),
                        reason: e.to_string(),
                    });
                }
            }

            tokio::time::sleep(config.delay).await;
        }

        next_page = match song_page.next_page {
            Some(next) if next <= page => {
                log::warn!("Provider repeated page {next} after page {page} for '{artist}', stopping");
                None
            }
            next => next,
        };
    }
}

/// Fetches, scrapes, and persists a single song.
async fn ingest_song(
    api: &dyn LyricsApi,
    scraper: &dyn LyricsScraper,
    lyrics_dir: &Path,
    song: SongReference,
) -> Result<PathBuf, IngestError> {
    let metadata = api.song_data(song.song_id).await?;
    let lyrics = scraper.scrape_lyrics(&metadata.url).await?;
    let record = metadata.into_record(lyrics);
    Ok(atemlos_record::write_record(lyrics_dir, &record)?)
}
