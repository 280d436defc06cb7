//! Bigram collocations over the concatenated token stream of a dataset.
//!
//! Scores follow the usual 2x2 contingency table of a bigram `(w1, w2)`:
//! `n_ii` is the bigram count, `n_ix` and `n_xi` the unigram counts of
//! `w1` and `w2`, and `n_xx` the number of tokens.

use std::collections::HashMap;

use atemlos_analytics_models::{AssociationMeasure, BigramCount, ScoredBigram, StopWords};
use atemlos_song_models::SongRow;

use crate::frequency::tokens;

/// Guards logarithms and divisions against zero.
const SMALL: f64 = 1e-20;

/// Unigram and bigram frequency distributions of a token stream.
#[derive(Debug, Clone, Default)]
pub struct BigramFinder {
    word_fd: HashMap<String, u64>,
    bigram_fd: HashMap<(String, String), u64>,
    total_words: u64,
}

impl BigramFinder {
    /// Counts unigrams and adjacent pairs in `words`.
    pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
        let mut finder = Self::default();
        let mut previous: Option<String> = None;

        for word in words {
            *finder.word_fd.entry(word.clone()).or_default() += 1;
            finder.total_words += 1;
            if let Some(prev) = previous.take() {
                *finder.bigram_fd.entry((prev, word.clone())).or_default() += 1;
            }
            previous = Some(word);
        }

        finder
    }

    /// Builds a finder over the lyrics of all `rows`, in dataset order, as
    /// one continuous token stream.
    #[must_use]
    pub fn from_rows(rows: &[SongRow], stop_words: StopWords) -> Self {
        Self::from_words(rows.iter().flat_map(|row| tokens(&row.lyrics, stop_words)))
    }

    /// Drops bigrams seen fewer than `min_freq` times.
    pub fn apply_freq_filter(&mut self, min_freq: u64) {
        self.bigram_fd.retain(|_, count| *count >= min_freq);
    }

    /// Number of tokens in the stream.
    #[must_use]
    pub const fn total_words(&self) -> u64 {
        self.total_words
    }

    /// Number of distinct bigrams left after filtering.
    #[must_use]
    pub fn distinct_bigrams(&self) -> usize {
        self.bigram_fd.len()
    }

    /// Occurrences of the pair `(first, second)`.
    #[must_use]
    pub fn count(&self, first: &str, second: &str) -> u64 {
        self.bigram_fd
            .get(&(first.to_owned(), second.to_owned()))
            .copied()
            .unwrap_or_default()
    }

    /// The `number` most frequent bigrams, ties in lexical order.
    #[must_use]
    pub fn popular(&self, number: usize) -> Vec<BigramCount> {
        let mut pairs: Vec<(&(String, String), &u64)> = self.bigram_fd.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        pairs
            .into_iter()
            .take(number)
            .map(|((first, second), count)| BigramCount {
                first: first.clone(),
                second: second.clone(),
                count: *count,
            })
            .collect()
    }

    /// Every bigram scored by `measure`, best first, ties in lexical order.
    #[must_use]
    pub fn score_ngrams(&self, measure: AssociationMeasure) -> Vec<ScoredBigram> {
        let mut scored: Vec<ScoredBigram> = self
            .bigram_fd
            .iter()
            .map(|((first, second), n_ii)| ScoredBigram {
                first: first.clone(),
                second: second.clone(),
                score: self.score(measure, *n_ii, first, second),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| (&a.first, &a.second).cmp(&(&b.first, &b.second)))
        });
        scored
    }

    /// The `number` best bigrams under `measure`.
    #[must_use]
    pub fn nbest(&self, measure: AssociationMeasure, number: usize) -> Vec<ScoredBigram> {
        let mut scored = self.score_ngrams(measure);
        scored.truncate(number);
        scored
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, measure: AssociationMeasure, n_ii: u64, first: &str, second: &str) -> f64 {
        let n_ii = n_ii as f64;
        let n_ix = self.word_fd.get(first).copied().unwrap_or_default() as f64;
        let n_xi = self.word_fd.get(second).copied().unwrap_or_default() as f64;
        let n_xx = self.total_words as f64;

        match measure {
            AssociationMeasure::RawFreq => n_ii / n_xx,
            AssociationMeasure::Pmi => (n_ii * n_xx).log2() - (n_ix * n_xi).log2(),
            AssociationMeasure::StudentT => (n_ii - n_ix * n_xi / n_xx) / (n_ii + SMALL).sqrt(),
            AssociationMeasure::ChiSq => {
                let [ii, oi, io, oo] = contingency(n_ii, n_ix, n_xi, n_xx);
                let numerator = ii.mul_add(oo, -(io * oi)).powi(2);
                let denominator = (ii + io) * (ii + oi) * (io + oo) * (oi + oo);
                n_xx * numerator / (denominator + SMALL)
            }
            AssociationMeasure::LikelihoodRatio => {
                let cont = contingency(n_ii, n_ix, n_xi, n_xx);
                let expected = expected_values(&cont, n_xx);
                2.0 * cont
                    .iter()
                    .zip(expected)
                    .map(|(obs, exp)| obs * (obs / (exp + SMALL) + SMALL).ln())
                    .sum::<f64>()
            }
        }
    }
}

/// Cells `[n_ii, n_oi, n_io, n_oo]` of the contingency table.
fn contingency(n_ii: f64, n_ix: f64, n_xi: f64, n_xx: f64) -> [f64; 4] {
    let n_oi = n_xi - n_ii;
    let n_io = n_ix - n_ii;
    [n_ii, n_oi, n_io, n_xx - n_ii - n_oi - n_io]
}

/// Expected cell values under independence, in [`contingency`] order.
fn expected_values(cont: &[f64; 4], n_xx: f64) -> [f64; 4] {
    std::array::from_fn(|i| (cont[i] + cont[i ^ 1]) * (cont[i] + cont[i ^ 2]) / n_xx)
}
