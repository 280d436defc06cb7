//! Word tokenizer shared by `WordsUsed` and the analytics consumers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// A run of letters or digits with at most one internal apostrophe.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\W_]+(?:['’][^\W_]+)?").expect("word regex is valid")
});

/// Lowercased word tokens of `text` in order, with `’` folded to `'`.
pub fn word_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase().replace('’', "'"))
}

/// Number of distinct case-folded tokens in `text`.
#[must_use]
pub fn words_used(text: &str) -> u64 {
    let distinct: BTreeSet<String> = word_tokens(text).collect();
    distinct.len() as u64
}
