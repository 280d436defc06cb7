//! Cached dataset blob.
//!
//! The dataset is stored as a MessagePack document carrying a format
//! version. A blob that is missing, undecodable, or of another version is
//! treated as absent. There is no staleness tracking: after new record
//! files are written the blob must be invalidated or rebuilt explicitly.

use std::path::Path;

use atemlos_song_models::{Dataset, SongRow};
use serde::{Deserialize, Serialize};

use crate::{DatasetError, load_dataset};

/// Version written into every blob; bump when [`SongRow`] changes shape.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CachedDataset {
    version: u32,
    rows: Vec<SongRow>,
}

/// Reads the blob at `path`, returning `None` if it is absent or unusable.
#[must_use]
pub fn read_blob(path: &Path) -> Option<Dataset> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No cached dataset at {}", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("Failed to read cached dataset {}: {e}", path.display());
            return None;
        }
    };

    match rmp_serde::from_slice::<CachedDataset>(&bytes) {
        Ok(cached) if cached.version == FORMAT_VERSION => {
            log::debug!(
                "Loaded {} rows from cached dataset {}",
                cached.rows.len(),
                path.display()
            );
            Some(Dataset { rows: cached.rows })
        }
        Ok(cached) => {
            log::warn!(
                "Cached dataset {} has version {}, expected {FORMAT_VERSION}; rebuilding",
                path.display(),
                cached.version
            );
            None
        }
        Err(e) => {
            log::warn!(
                "Failed to decode cached dataset {}: {e}; rebuilding",
                path.display()
            );
            None
        }
    }
}

/// Writes `dataset` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`DatasetError`] if encoding or writing fails.
pub fn write_blob(path: &Path, dataset: &Dataset) -> Result<(), DatasetError> {
    let io_err = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let cached = CachedDataset {
        version: FORMAT_VERSION,
        rows: dataset.rows.clone(),
    };
    let bytes = rmp_serde::to_vec_named(&cached)?;
    std::fs::write(path, bytes).map_err(io_err)?;

    log::info!(
        "Cached {} rows at {}",
        dataset.len(),
        path.display()
    );
    Ok(())
}

/// Returns the cached dataset if usable, otherwise rebuilds it from the
/// record files in `lyrics_dir` and caches the result.
///
/// # Errors
///
/// Returns [`DatasetError`] if a rebuild is needed and fails.
pub fn load_or_build(lyrics_dir: &Path, blob_path: &Path) -> Result<Dataset, DatasetError> {
    match read_blob(blob_path) {
        Some(dataset) => Ok(dataset),
        None => rebuild(lyrics_dir, blob_path),
    }
}

/// Re-parses every record file and overwrites the blob.
///
/// # Errors
///
/// Returns [`DatasetError`] if the lyrics directory cannot be listed or
/// the blob cannot be written.
pub fn rebuild(lyrics_dir: &Path, blob_path: &Path) -> Result<Dataset, DatasetError> {
    let dataset = load_dataset(lyrics_dir)?;
    write_blob(blob_path, &dataset)?;
    Ok(dataset)
}

/// Deletes the blob. Returns whether a blob existed.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the blob exists but cannot be removed.
pub fn invalidate(blob_path: &Path) -> Result<bool, DatasetError> {
    match std::fs::remove_file(blob_path) {
        Ok(()) => {
            log::info!("Removed cached dataset {}", blob_path.display());
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(DatasetError::Io {
            path: blob_path.to_path_buf(),
            source,
        }),
    }
}
