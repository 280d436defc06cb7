#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Configuration file loading and canonical data paths.
//!
//! The configuration is a small TOML file holding the Genius client
//! access token plus optional scrape parameters and path overrides. It is
//! loaded once at startup and handed explicitly to the ingestion
//! pipeline and the dataset loader.

pub mod paths;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable that overrides the configured access token.
pub const TOKEN_ENV_VAR: &str = "ATEMLOS_CLIENT_ACCESS_TOKEN";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "ATEMLOS_CONFIG";

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`Config`].
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Toml {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// No usable client access token is configured.
    #[error(
        "No client access token configured: set `client_access_token` in {} or ATEMLOS_CLIENT_ACCESS_TOKEN",
        .path.display()
    )]
    MissingToken {
        /// Configuration file the token was expected in.
        path: PathBuf,
    },
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Bearer token for the Genius API.
    #[serde(default)]
    pub client_access_token: Option<String>,
    /// Scraping parameters.
    #[serde(default)]
    pub scrape: ScrapeSettings,
    /// Data path overrides.
    #[serde(default)]
    pub paths: PathSettings,
    /// File the configuration was loaded from.
    #[serde(skip)]
    pub source_path: PathBuf,
}

/// Parameters controlling an ingestion run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeSettings {
    /// Artist display names to scrape, in order.
    pub artists: Vec<String>,
    /// Song IDs requested per enumeration page.
    pub songs_per_page: u32,
    /// Maximum number of enumeration pages per artist.
    pub max_pages: u32,
    /// Delay between consecutive song fetches, in seconds.
    pub delay_secs: u64,
    /// CSS selector of the element holding the lyrics on a song page.
    pub lyrics_selector: String,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            artists: vec!["Sia".to_string()],
            songs_per_page: 10,
            max_pages: 1,
            delay_secs: 2,
            lyrics_selector: "div.lyrics".to_string(),
        }
    }
}

impl ScrapeSettings {
    /// The inter-song delay as a [`Duration`].
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Optional overrides for the data locations. Relative paths are
/// resolved against the project root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding one record file per song.
    pub lyrics_dir: Option<PathBuf>,
    /// Directory receiving run logs.
    pub logs_dir: Option<PathBuf>,
    /// Location of the cached dataset blob.
    pub dataset_path: Option<PathBuf>,
}

impl PathSettings {
    /// Resolved lyrics directory.
    #[must_use]
    pub fn lyrics_dir(&self) -> PathBuf {
        self.lyrics_dir
            .as_deref()
            .map_or_else(paths::lyrics_dir, paths::resolve)
    }

    /// Resolved run log directory.
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.logs_dir
            .as_deref()
            .map_or_else(paths::logs_dir, paths::resolve)
    }

    /// Resolved dataset blob path.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        self.dataset_path
            .as_deref()
            .map_or_else(paths::dataset_path, paths::resolve)
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// The file is taken from `path` if given, else from the
    /// [`CONFIG_ENV_VAR`] environment variable, else from
    /// [`paths::config_path`]. An explicitly requested file must exist;
    /// a missing default file yields the default configuration. The
    /// [`TOKEN_ENV_VAR`] environment variable overrides the token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = paths::config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    log::warn!(
                        "No config file at {}, using defaults",
                        path.display()
                    );
                    Self {
                        source_path: path,
                        ..Self::default()
                    }
                }
            }
        };

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            config.override_token(token);
        }

        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.source_path = path.to_path_buf();
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`toml::de::Error`] if the text is not a valid config.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Replaces the configured token. Blank values are ignored.
    pub fn override_token(&mut self, token: String) {
        if !token.trim().is_empty() {
            self.client_access_token = Some(token);
        }
    }

    /// Returns the access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] if no non-blank token is
    /// configured.
    pub fn access_token(&self) -> Result<&str, ConfigError> {
        self.client_access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ConfigError::MissingToken {
                path: self.source_path.clone(),
            })
    }
}
