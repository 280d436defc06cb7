//! Plain-text run log written at the end of every ingestion run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use atemlos_ingest_models::RunSummary;

use crate::IngestError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log file name for a run, derived from its local start time.
#[must_use]
pub fn run_log_file_name(summary: &RunSummary) -> String {
    format!("log_{}.txt", summary.started_at.format("%Y_%m_%d_%H%M%S"))
}

/// Renders the run log lines, separated by `";\n"`.
#[must_use]
pub fn format_run_log(summary: &RunSummary) -> String {
    let average = summary
        .average_songs_per_artist()
        .map_or_else(|| "n/a".to_owned(), |avg| format!("{avg:.2}"));
    let per_song = summary
        .time_per_song()
        .map_or_else(|| "n/a".to_owned(), format_duration);
    let failed: Vec<u64> = summary.failed_songs.iter().map(|s| s.song.song_id).collect();

    let lines = [
        format!("Start time: {}", summary.started_at.format(TIMESTAMP_FORMAT)),
        format!("End time: {}", summary.finished_at.format(TIMESTAMP_FORMAT)),
        format!("Duration: {}", format_duration(summary.duration())),
        format!("Delay timer set to [seconds]: {}", summary.delay.as_secs_f64()),
        format!("Number of artists: {}", summary.artists_processed),
        format!("Number of songs: {}", summary.songs_written),
        format!("Average no. of songs per artist: {average}"),
        format!("Time per song: {per_song}"),
        format!("Artists not found: {:?}", summary.not_found),
        format!("Songs failed: {failed:?}"),
    ];

    let mut text = lines.join(";\n");
    text.push('\n');
    text
}

/// Writes the run log into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`IngestError::RunLog`] if the directory or file cannot be
/// written.
pub fn write_run_log(dir: &Path, summary: &RunSummary) -> Result<PathBuf, IngestError> {
    let path = dir.join(run_log_file_name(summary));

    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, format_run_log(summary)))
        .map_err(|source| IngestError::RunLog {
            path: path.clone(),
            source,
        })?;

    log::debug!("Run log written to {}", path.display());
    Ok(path)
}

/// Formats a duration as `H:MM:SS.mmm`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        duration.subsec_millis()
    )
}
