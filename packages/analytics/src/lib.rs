#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistics over a lyrics dataset.
//!
//! Every function takes dataset rows and returns plain result types from
//! `atemlos_analytics_models`:
//!
//! * [`overview`]: artist and song counts, hit songs, vocabulary size per
//!   artist and per epoch.
//! * [`frequency`]: word frequencies overall and per release year, and
//!   yearly trends of the most common words.
//! * [`bigrams`]: bigram counts and association scores.

pub mod bigrams;
pub mod frequency;
pub mod overview;
pub mod stopwords;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The requested reference year has no songs.
    #[error("No songs released in {0}")]
    UnknownYear(i32),
}
