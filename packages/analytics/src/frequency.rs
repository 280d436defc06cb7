//! Word frequencies overall and per release year.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use atemlos_analytics_models::{StopWords, TrendReference, WordCount, WordTrend, YearShare};
use atemlos_dataset::words::word_tokens;
use atemlos_song_models::SongRow;
use chrono::Datelike;

use crate::AnalyticsError;
use crate::stopwords::is_stop_word;

/// Token counts plus the total number of counted tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Counts the tokens of every song's lyrics.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a SongRow>, stop_words: StopWords) -> Self {
        let mut table = Self::default();
        for row in rows {
            for word in tokens(&row.lyrics, stop_words) {
                *table.counts.entry(word).or_default() += 1;
                table.total += 1;
            }
        }
        table
    }

    /// Occurrences of `word`.
    #[must_use]
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or_default()
    }

    /// Number of counted tokens.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Share of `word` in percent, `0.0` for an empty table.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64 * 100.0
    }

    /// The `number` most common words, ties broken alphabetically.
    #[must_use]
    pub fn most_common(&self, number: usize) -> Vec<WordCount> {
        let mut counts: Vec<(&String, &u64)> = self.counts.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        counts
            .into_iter()
            .take(number)
            .map(|(word, count)| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect()
    }
}

/// Tokens of `text`, optionally without stop words.
pub fn tokens(text: &str, stop_words: StopWords) -> impl Iterator<Item = String> + '_ {
    word_tokens(text).filter(move |word| stop_words == StopWords::Keep || !is_stop_word(word))
}

/// Distinct release years, ascending.
#[must_use]
pub fn release_years(rows: &[SongRow]) -> Vec<i32> {
    rows.iter()
        .map(|row| row.release_date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One frequency table per release year.
#[must_use]
pub fn frequency_by_year(rows: &[SongRow], stop_words: StopWords) -> BTreeMap<i32, FrequencyTable> {
    let mut by_year: BTreeMap<i32, Vec<&SongRow>> = BTreeMap::new();
    for row in rows {
        by_year.entry(row.release_date.year()).or_default().push(row);
    }

    by_year
        .into_iter()
        .map(|(year, songs)| (year, FrequencyTable::from_rows(songs, stop_words)))
        .collect()
}

/// Yearly shares of the `number` most common words, chosen either over
/// the whole dataset or within one reference year.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownYear`] if the reference year has no
/// songs.
pub fn top_word_trends(
    rows: &[SongRow],
    number: usize,
    reference: TrendReference,
    stop_words: StopWords,
) -> Result<Vec<WordTrend>, AnalyticsError> {
    let by_year = frequency_by_year(rows, stop_words);

    let top = match reference {
        TrendReference::Overall => FrequencyTable::from_rows(rows, stop_words).most_common(number),
        TrendReference::Year(year) => by_year
            .get(&year)
            .ok_or(AnalyticsError::UnknownYear(year))?
            .most_common(number),
    };

    Ok(top
        .into_iter()
        .map(|WordCount { word, .. }| {
            let shares = by_year
                .iter()
                .map(|(year, table)| YearShare {
                    year: *year,
                    percent: table.percent(&word),
                })
                .collect();
            WordTrend { word, shares }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use atemlos_song_models::LyricsState;
    use chrono::NaiveDate;

    use super::*;

    fn row(year: i32, lyrics: &str) -> SongRow {
        SongRow {
            full_title: "Song by Sia".to_string(),
            song_title: "Song".to_string(),
            artist: "Sia".to_string(),
            release_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            pageviews: 0,
            lyrics_state: LyricsState::Complete,
            lyrics: lyrics.to_string(),
            words_used: 0,
        }
    }

    fn rows() -> Vec<SongRow> {
        vec![
            row(2014, "I'm gonna swing from the chandelier, from the chandelier"),
            row(2014, "Party girls don't get hurt"),
            row(2016, "I'm still breathing, I'm alive"),
        ]
    }

    #[test]
    fn stop_words_are_excluded_unless_kept() {
        let without = FrequencyTable::from_rows(&rows(), StopWords::Exclude);
        assert_eq!(without.count("the"), 0);
        assert_eq!(without.count("chandelier"), 2);

        let with = FrequencyTable::from_rows(&rows(), StopWords::Keep);
        assert_eq!(with.count("the"), 2);
        assert!(with.total() > without.total());
    }

    #[test]
    fn most_common_breaks_ties_alphabetically() {
        let table = FrequencyTable::from_rows(&rows(), StopWords::Exclude);
        let top: Vec<(String, u64)> = table
            .most_common(3)
            .into_iter()
            .map(|w| (w.word, w.count))
            .collect();
        assert_eq!(
            top,
            [
                ("i'm".to_string(), 3),
                ("chandelier".to_string(), 2),
                ("alive".to_string(), 1)
            ]
        );
    }

    #[test]
    fn lists_distinct_years() {
        assert_eq!(release_years(&rows()), [2014, 2016]);
    }

    #[test]
    fn yearly_tables_count_only_that_year() {
        let by_year = frequency_by_year(&rows(), StopWords::Exclude);
        assert_eq!(by_year[&2014].count("chandelier"), 2);
        assert_eq!(by_year[&2016].count("chandelier"), 0);
        assert_eq!(by_year[&2016].total(), 5);
    }

    #[test]
    fn trends_report_percent_per_year() {
        let trends =
            top_word_trends(&rows(), 1, TrendReference::Year(2016), StopWords::Exclude).unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].word, "i'm");

        let shares: Vec<i32> = trends[0].shares.iter().map(|s| s.year).collect();
        assert_eq!(shares, [2014, 2016]);
        assert!((trends[0].shares[1].percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_reference_year_is_an_error() {
        let err = top_word_trends(&rows(), 3, TrendReference::Year(1999), StopWords::Exclude)
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownYear(1999)));
    }
}
