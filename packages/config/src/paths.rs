#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for scraped lyrics, run logs, and the dataset
//! cache.
//!
//! All defaults are relative to the project root's `data/` directory.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the `data/lyrics/` directory holding one record file per song.
#[must_use]
pub fn lyrics_dir() -> PathBuf {
    data_dir().join("lyrics")
}

/// Returns the `data/logs/` directory for ingestion run logs.
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Returns the path of the cached dataset blob.
#[must_use]
pub fn dataset_path() -> PathBuf {
    data_dir().join("dataset.msgpack")
}

/// Returns the default configuration file path.
#[must_use]
pub fn config_path() -> PathBuf {
    project_root().join("config").join("config.toml")
}

/// Resolves a configured path: absolute paths are used as-is, relative
/// ones are taken from the project root.
#[must_use]
pub fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root().join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_paths_live_under_project_root() {
        let root = project_root();
        assert!(lyrics_dir().starts_with(&root));
        assert!(logs_dir().starts_with(data_dir()));
        assert_eq!(dataset_path().extension().unwrap(), "msgpack");
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve(dir.path()), dir.path());
        assert_eq!(resolve(Path::new("data/x")), project_root().join("data/x"));
    }
}
