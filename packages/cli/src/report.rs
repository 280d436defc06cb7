//! `atemlos report`: console statistics over the dataset.

use atemlos_analytics::AnalyticsError;
use atemlos_analytics::bigrams::BigramFinder;
use atemlos_analytics::frequency::top_word_trends;
use atemlos_analytics::overview;
use atemlos_analytics_models::{AssociationMeasure, StopWords, TrendReference};
use atemlos_song_models::Dataset;
use clap::Args;

/// Options of the `report` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Number of hit songs and top words to show
    #[arg(long, default_value_t = 10)]
    pub top: usize,
    /// Pick the top words from this release year instead of all years
    #[arg(long)]
    pub year: Option<i32>,
    /// Number of bigrams to show
    #[arg(long, default_value_t = 10)]
    pub bigrams: usize,
    /// Bigram association measure
    #[arg(long, default_value_t = AssociationMeasure::RawFreq)]
    pub measure: AssociationMeasure,
    /// Ignore bigrams seen fewer times than this
    #[arg(long, default_value_t = 1)]
    pub min_freq: u64,
    /// Count stop words too
    #[arg(long)]
    pub keep_stopwords: bool,
    /// Length of an epoch in years
    #[arg(long, default_value_t = 10)]
    pub epoch: u16,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            top: 10,
            year: None,
            bigrams: 10,
            measure: AssociationMeasure::RawFreq,
            min_freq: 1,
            keep_stopwords: false,
            epoch: 10,
        }
    }
}

impl ReportArgs {
    const fn stop_words(&self) -> StopWords {
        if self.keep_stopwords {
            StopWords::Keep
        } else {
            StopWords::Exclude
        }
    }
}

/// Prints the overview, word trends and bigrams.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownYear`] if `--year` names a year
/// without songs.
pub fn print(dataset: &Dataset, args: &ReportArgs) -> Result<(), AnalyticsError> {
    let rows = &dataset.rows;
    if rows.is_empty() {
        println!("The dataset is empty. Run `atemlos collect` first.");
        return Ok(());
    }

    let summary = overview::overview(rows);
    println!("== Overview ==");
    println!("Artists: {}", summary.artists);
    println!("Songs:   {}", summary.songs);
    if let Some(average) = summary.average_songs_per_artist {
        println!("Average songs per artist: {average:.2}");
    }

    println!();
    println!("== Songs per artist ==");
    for count in overview::songs_per_artist(rows) {
        println!("{:<30} {:>4}", count.artist, count.songs);
    }

    println!();
    println!("== Words used per artist ==");
    for words in overview::words_per_artist(rows) {
        println!("{:<30} {:>7.1}", words.artist, words.mean_words_used);
    }

    println!();
    println!("== Top {} hit songs ==", args.top);
    for hit in overview::hit_songs(rows, args.top) {
        println!(
            "{:>10} views  {} ({}), {} words used",
            hit.pageviews, hit.title, hit.artist, hit.words_used
        );
    }

    println!();
    println!("== Words used per {}-year epoch ==", args.epoch);
    for epoch in overview::words_per_epoch(rows, args.epoch) {
        println!(
            "{}-{}: {:>4} songs, {:>7.1} words used on average",
            epoch.start_year, epoch.end_year, epoch.songs, epoch.mean_words_used
        );
    }

    let stop_words = args.stop_words();
    let reference = args.year.map_or(TrendReference::Overall, TrendReference::Year);

    println!();
    match reference {
        TrendReference::Overall => println!("== Top {} words ==", args.top),
        TrendReference::Year(year) => println!("== Top {} words of {year} ==", args.top),
    }
    for trend in top_word_trends(rows, args.top, reference, stop_words)? {
        let shares: Vec<String> = trend
            .shares
            .iter()
            .map(|share| format!("{}: {:.2}%", share.year, share.percent))
            .collect();
        println!("{:<15} {}", trend.word, shares.join("  "));
    }

    let mut finder = BigramFinder::from_rows(rows, stop_words);
    finder.apply_freq_filter(args.min_freq);

    println!();
    println!("== Top {} bigrams by {} ==", args.bigrams, args.measure);
    if args.measure == AssociationMeasure::RawFreq {
        for bigram in finder.popular(args.bigrams) {
            println!("{:>6}  {} {}", bigram.count, bigram.first, bigram.second);
        }
    } else {
        for bigram in finder.nbest(args.measure, args.bigrams) {
            println!("{:>10.3}  {} {}", bigram.score, bigram.first, bigram.second);
        }
    }

    Ok(())
}
