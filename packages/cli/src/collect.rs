//! `atemlos collect`: run the ingestion pipeline.

use std::path::Path;
use std::time::Duration;

use atemlos_cli_utils::{IndicatifProgress, MultiProgress};
use atemlos_config::Config;
use atemlos_dataset::DatasetError;
use atemlos_genius::GeniusClient;
use atemlos_ingest::run_log::format_duration;
use atemlos_ingest_models::{IngestConfig, RunSummary};
use atemlos_scraper::{ArtistListScraper, LyricsPageScraper};
use clap::Args;

/// Options of the `collect` subcommand. Unset options fall back to the
/// `[scrape]` section of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct CollectArgs {
    /// Artist to scrape (repeatable, replaces the configured list)
    #[arg(long)]
    pub artist: Vec<String>,
    /// Page listing artist names to scrape instead of the configured list
    #[arg(long)]
    pub artists_url: Option<String>,
    /// CSS selector of the entries on the artist list page
    #[arg(long, default_value = atemlos_scraper::artist_list::DEFAULT_ITEM_SELECTOR)]
    pub artists_selector: String,
    /// Maximum number of artists taken from the artist list page
    #[arg(long)]
    pub artists_limit: Option<usize>,
    /// Maximum number of song pages per artist
    #[arg(long)]
    pub max_pages: Option<u32>,
    /// Songs requested per page
    #[arg(long)]
    pub per_page: Option<u32>,
    /// Pause after every song, in seconds
    #[arg(long)]
    pub delay: Option<u64>,
}

/// Builds the pipeline input from the config file and command-line
/// overrides. `artists` has already been chosen by the caller.
pub fn ingest_config(config: &Config, args: &CollectArgs, artists: Vec<String>) -> IngestConfig {
    let scrape = &config.scrape;
    IngestConfig {
        artists,
        songs_per_page: args.per_page.unwrap_or(scrape.songs_per_page),
        max_pages: args.max_pages.unwrap_or(scrape.max_pages),
        delay: args.delay.map_or_else(|| scrape.delay(), Duration::from_secs),
        lyrics_dir: config.paths.lyrics_dir(),
        logs_dir: config.paths.logs_dir(),
    }
}

/// Picks the artist list: explicit `--artist` names first, then the
/// artist list page, then the config file.
async fn artists(config: &Config, args: &CollectArgs) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if !args.artist.is_empty() {
        return Ok(args.artist.clone());
    }

    if let Some(url) = &args.artists_url {
        log::info!("Fetching artist list from {url}");
        let names = ArtistListScraper::new(url)?
            .with_item_selector(&args.artists_selector)
            .with_limit(args.artists_limit)
            .fetch_artist_names()
            .await?;
        return Ok(names);
    }

    Ok(config.scrape.artists.clone())
}

/// Runs a full scrape and prints its summary.
///
/// # Errors
///
/// Returns an error if no access token is configured (checked before any
/// request), the artist list cannot be fetched, the run log cannot be
/// written, or the stale dataset cache cannot be removed.
pub async fn run(
    multi: &MultiProgress,
    config: &Config,
    args: &CollectArgs,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let token = config.access_token()?;
    let api = GeniusClient::new(token)?;
    let scraper = LyricsPageScraper::new()?.with_container_selector(&config.scrape.lyrics_selector);

    let ingest_config = ingest_config(config, args, artists(config, args).await?);

    let progress = IndicatifProgress::steps_bar(multi, "Resolving artists");
    let summary = atemlos_ingest::run_ingest(&api, &scraper, &ingest_config, progress).await?;
    invalidate_cache(&config.paths.dataset_path(), &summary)?;

    print_summary(&summary);
    Ok(summary)
}

/// Deletes the cached dataset once a run has written records, so the next
/// load re-parses the lyrics directory. Returns whether a blob was removed.
fn invalidate_cache(blob_path: &Path, summary: &RunSummary) -> Result<bool, DatasetError> {
    if summary.songs_written == 0 {
        return Ok(false);
    }

    let removed = atemlos_dataset::invalidate(blob_path)?;
    if removed {
        log::info!(
            "{} new songs, dataset cache will be rebuilt on the next load",
            summary.songs_written
        );
    }
    Ok(removed)
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("Artists processed: {}", summary.artists_processed);
    println!("Songs written:     {}", summary.songs_written);
    println!("Duration:          {}", format_duration(summary.duration()));
    if let Some(per_song) = summary.time_per_song() {
        println!("Time per song:     {}", format_duration(per_song));
    }
    if !summary.not_found.is_empty() {
        println!("Not found:         {}", summary.not_found.join(", "));
    }
    for failed in &summary.failed_artists {
        println!("Artist failed:     {} ({})", failed.artist, failed.reason);
    }
    for failed in &summary.failed_songs {
        println!("Song failed:       {} of {} ({})", failed.song.song_id, failed.artist, failed.reason);
    }
}

#[cfg(test)]
mod tests {
    use atemlos_song_models::SongRecord;

    use super::*;

    fn record(title: &str) -> SongRecord {
        SongRecord {
            full_title: format!("{title} by Sia"),
            title: title.to_string(),
            artist_name: "Sia".to_string(),
            release_date: Some("2014-03-17".to_string()),
            pageviews: Some(1000),
            lyrics_state: Some("complete".to_string()),
            lyrics: "[Chorus]\nI'm gonna swing from the chandelier\n".to_string(),
        }
    }

    #[test]
    fn new_records_invalidate_the_cached_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let lyrics_dir = dir.path().join("lyrics");
        let blob_path = dir.path().join("dataset.msgpack");

        atemlos_record::write_record(&lyrics_dir, &record("Chandelier")).unwrap();
        let before = atemlos_dataset::load_or_build(&lyrics_dir, &blob_path).unwrap();
        assert_eq!(before.len(), 1);

        atemlos_record::write_record(&lyrics_dir, &record("Alive")).unwrap();
        atemlos_record::write_record(&lyrics_dir, &record("Elastic Heart")).unwrap();
        let mut summary = RunSummary::start(Duration::ZERO);
        summary.songs_written = 2;

        assert!(invalidate_cache(&blob_path, &summary).unwrap());
        assert!(!blob_path.exists());

        let after = atemlos_dataset::load_or_build(&lyrics_dir, &blob_path).unwrap();
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn run_without_new_songs_keeps_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let lyrics_dir = dir.path().join("lyrics");
        let blob_path = dir.path().join("dataset.msgpack");

        atemlos_record::write_record(&lyrics_dir, &record("Chandelier")).unwrap();
        atemlos_dataset::load_or_build(&lyrics_dir, &blob_path).unwrap();

        let summary = RunSummary::start(Duration::ZERO);
        assert!(!invalidate_cache(&blob_path, &summary).unwrap());
        assert!(blob_path.exists());
    }

    #[test]
    fn command_line_overrides_config() {
        let config = Config::from_toml_str("[scrape]\nmax_pages = 3\ndelay_secs = 7").unwrap();
        let args = CollectArgs {
            per_page: Some(50),
            ..CollectArgs::default()
        };

        let ingest = ingest_config(&config, &args, vec!["Sia".to_string()]);
        assert_eq!(ingest.artists, ["Sia"]);
        assert_eq!(ingest.songs_per_page, 50);
        assert_eq!(ingest.max_pages, 3);
        assert_eq!(ingest.delay, Duration::from_secs(7));
        assert_eq!(ingest.lyrics_dir, config.paths.lyrics_dir());
    }

    #[tokio::test]
    async fn explicit_artists_win_over_config() {
        let config = Config::from_toml_str("[scrape]\nartists = [\"Andrea Berg\"]").unwrap();

        let args = CollectArgs {
            artist: vec!["Sia".to_string()],
            ..CollectArgs::default()
        };
        assert_eq!(artists(&config, &args).await.unwrap(), ["Sia"]);

        let args = CollectArgs::default();
        assert_eq!(artists(&config, &args).await.unwrap(), ["Andrea Berg"]);
    }
}
