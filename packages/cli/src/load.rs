//! `atemlos load`: build or read the cached dataset.

use atemlos_cli_utils::MultiProgress;
use atemlos_config::Config;
use atemlos_dataset::DatasetError;
use atemlos_song_models::Dataset;

/// Loads the dataset, discarding the cached blob first when `rebuild`
/// is set.
///
/// # Errors
///
/// Returns [`DatasetError`] if the blob cannot be removed, the lyrics
/// directory cannot be listed, or the rebuilt blob cannot be written.
pub fn run(multi: &MultiProgress, config: &Config, rebuild: bool) -> Result<Dataset, DatasetError> {
    let lyrics_dir = config.paths.lyrics_dir();
    let blob_path = config.paths.dataset_path();

    if rebuild {
        atemlos_dataset::invalidate(&blob_path)?;
    }

    let spinner = atemlos_cli_utils::spinner(multi, "Loading dataset");
    let dataset = atemlos_dataset::load_or_build(&lyrics_dir, &blob_path);
    spinner.finish_and_clear();

    dataset
}

/// Prints row, artist and year counts.
pub fn print_counts(dataset: &Dataset) {
    let years = atemlos_analytics::frequency::release_years(&dataset.rows);

    println!("Songs:   {}", dataset.len());
    println!("Artists: {}", dataset.artists().len());
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => println!("Years:   {first}-{last} ({} distinct)", years.len()),
        _ => println!("Years:   none"),
    }
}
