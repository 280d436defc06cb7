#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytics parameter and result types.
//!
//! Plain data returned by the `atemlos_analytics` computations; rendering
//! is left to the caller.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Dataset headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Number of distinct artists.
    pub artists: usize,
    /// Number of songs.
    pub songs: usize,
    /// Songs per artist, `None` for an empty dataset.
    pub average_songs_per_artist: Option<f64>,
}

/// Number of songs by one artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCount {
    /// Artist name.
    pub artist: String,
    /// Number of songs.
    pub songs: usize,
}

/// Mean vocabulary size of one artist's songs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistWords {
    /// Artist name.
    pub artist: String,
    /// Number of songs.
    pub songs: usize,
    /// Mean `WordsUsed` over those songs.
    pub mean_words_used: f64,
}

/// A song ranked by page views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitSong {
    /// Song title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Page views.
    pub pageviews: u64,
    /// Distinct words in the lyrics.
    pub words_used: u64,
}

/// Statistics for a span of release years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// First year of the epoch (a multiple of the epoch length).
    pub start_year: i32,
    /// Last year of the epoch, inclusive.
    pub end_year: i32,
    /// Number of songs released in the epoch.
    pub songs: usize,
    /// Mean `WordsUsed` of those songs.
    pub mean_words_used: f64,
}

/// Whether stop words take part in a computation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopWords {
    /// Count every token.
    Keep,
    /// Skip tokens on the English stop-word list.
    #[default]
    Exclude,
}

/// Occurrences of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The token.
    pub word: String,
    /// Number of occurrences.
    pub count: u64,
}

/// Which frequencies select the words of a trend table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendReference {
    /// Most common words across all years.
    #[default]
    Overall,
    /// Most common words of one release year.
    Year(i32),
}

/// Share of a word in one year's tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearShare {
    /// Release year.
    pub year: i32,
    /// Percentage of that year's counted tokens.
    pub percent: f64,
}

/// Yearly shares of one of the top words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTrend {
    /// The token.
    pub word: String,
    /// One entry per release year, ascending.
    pub shares: Vec<YearShare>,
}

/// Association measure used to score bigrams.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AssociationMeasure {
    /// Bigram count divided by the number of tokens.
    #[default]
    RawFreq,
    /// Pointwise mutual information (base 2).
    Pmi,
    /// Student's t statistic.
    StudentT,
    /// Pearson's chi-squared statistic.
    ChiSq,
    /// Dunning's log-likelihood ratio.
    LikelihoodRatio,
}

/// A bigram with its raw count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigramCount {
    /// First token.
    pub first: String,
    /// Second token.
    pub second: String,
    /// Number of occurrences.
    pub count: u64,
}

/// A bigram with its association score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBigram {
    /// First token.
    pub first: String,
    /// Second token.
    pub second: String,
    /// Score under the chosen measure.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_parse_from_snake_case() {
        assert_eq!("pmi".parse::<AssociationMeasure>().unwrap(), AssociationMeasure::Pmi);
        assert_eq!(
            "Likelihood_Ratio".parse::<AssociationMeasure>().unwrap(),
            AssociationMeasure::LikelihoodRatio
        );
        assert_eq!(AssociationMeasure::StudentT.to_string(), "student_t");
        assert!("dice".parse::<AssociationMeasure>().is_err());
    }

    #[test]
    fn stop_words_are_excluded_by_default() {
        assert_eq!(StopWords::default(), StopWords::Exclude);
        assert_eq!(StopWords::Keep.as_ref(), "keep");
    }
}
