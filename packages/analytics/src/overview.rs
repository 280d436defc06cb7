//! Dataset overview: artist and song counts, hit songs, and vocabulary
//! size per artist and per epoch.

use std::collections::BTreeMap;

use atemlos_analytics_models::{ArtistCount, ArtistWords, EpochStats, HitSong, Overview};
use atemlos_song_models::SongRow;
use chrono::Datelike;

/// Headline numbers for `rows`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn overview(rows: &[SongRow]) -> Overview {
    let artists = per_artist(rows).len();
    let songs = rows.len();

    Overview {
        artists,
        songs,
        average_songs_per_artist: (artists > 0).then(|| songs as f64 / artists as f64),
    }
}

/// Song count per artist, most prolific first, ties by name.
#[must_use]
pub fn songs_per_artist(rows: &[SongRow]) -> Vec<ArtistCount> {
    let mut counts: Vec<ArtistCount> = per_artist(rows)
        .into_iter()
        .map(|(artist, songs)| ArtistCount {
            artist: artist.to_owned(),
            songs: songs.len(),
        })
        .collect();

    counts.sort_by(|a, b| b.songs.cmp(&a.songs).then_with(|| a.artist.cmp(&b.artist)));
    counts
}

/// Mean `WordsUsed` per artist, ordered by artist name.
#[must_use]
pub fn words_per_artist(rows: &[SongRow]) -> Vec<ArtistWords> {
    per_artist(rows)
        .into_iter()
        .map(|(artist, songs)| ArtistWords {
            artist: artist.to_owned(),
            songs: songs.len(),
            mean_words_used: mean_words_used(&songs),
        })
        .collect()
}

/// The `number` songs with the most page views, most viewed first.
#[must_use]
pub fn hit_songs(rows: &[SongRow], number: usize) -> Vec<HitSong> {
    let mut ranked: Vec<&SongRow> = rows.iter().collect();
    ranked.sort_by(|a, b| {
        b.pageviews
            .cmp(&a.pageviews)
            .then_with(|| a.song_title.cmp(&b.song_title))
    });

    ranked
        .into_iter()
        .take(number)
        .map(|row| HitSong {
            title: row.song_title.clone(),
            artist: row.artist.clone(),
            pageviews: row.pageviews,
            words_used: row.words_used,
        })
        .collect()
}

/// Mean `WordsUsed` and song count per epoch of `years` release years,
/// aligned to multiples of `years`. Epochs without songs are omitted.
#[must_use]
pub fn words_per_epoch(rows: &[SongRow], years: u16) -> Vec<EpochStats> {
    let span = i32::from(years.max(1));

    let mut epochs: BTreeMap<i32, Vec<&SongRow>> = BTreeMap::new();
    for row in rows {
        let start = row.release_date.year().div_euclid(span) * span;
        epochs.entry(start).or_default().push(row);
    }

    epochs
        .into_iter()
        .map(|(start_year, songs)| EpochStats {
            start_year,
            end_year: start_year + span - 1,
            songs: songs.len(),
            mean_words_used: mean_words_used(&songs),
        })
        .collect()
}

fn per_artist(rows: &[SongRow]) -> BTreeMap<&str, Vec<&SongRow>> {
    let mut artists: BTreeMap<&str, Vec<&SongRow>> = BTreeMap::new();
    for row in rows {
        artists.entry(row.artist.as_str()).or_default().push(row);
    }
    artists
}

#[allow(clippy::cast_precision_loss)]
fn mean_words_used(songs: &[&SongRow]) -> f64 {
    if songs.is_empty() {
        return 0.0;
    }
    let total: u64 = songs.iter().map(|row| row.words_used).sum();
    total as f64 / songs.len() as f64
}

#[cfg(test)]
mod tests {
    use atemlos_song_models::LyricsState;
    use chrono::NaiveDate;

    use super::*;

    fn row(artist: &str, title: &str, year: i32, pageviews: u64, words_used: u64) -> SongRow {
        SongRow {
            full_title: format!("{title} by {artist}"),
            song_title: title.to_string(),
            artist: artist.to_string(),
            release_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            pageviews,
            lyrics_state: LyricsState::Complete,
            lyrics: String::new(),
            words_used,
        }
    }

    fn rows() -> Vec<SongRow> {
        vec![
            row("Sia", "Chandelier", 2014, 900, 60),
            row("Sia", "Alive", 2015, 300, 40),
            row("Sia", "Breathe Me", 2004, 100, 50),
            row("Adele", "Hello", 2015, 1200, 80),
            row("Beyonce", "Halo", 2008, 700, 70),
        ]
    }

    #[test]
    fn overview_counts_artists_and_songs() {
        let overview = overview(&rows());
        assert_eq!(overview.artists, 3);
        assert_eq!(overview.songs, 5);
        assert!((overview.average_songs_per_artist.unwrap() - 5.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_dataset_has_no_average() {
        assert_eq!(overview(&[]).average_songs_per_artist, None);
    }

    #[test]
    fn songs_per_artist_sorts_by_count_then_name() {
        let counts = songs_per_artist(&rows());
        let order: Vec<(&str, usize)> = counts.iter().map(|c| (c.artist.as_str(), c.songs)).collect();
        assert_eq!(order, [("Sia", 3), ("Adele", 1), ("Beyonce", 1)]);
    }

    #[test]
    fn words_per_artist_averages_vocabulary() {
        let words = words_per_artist(&rows());
        let sia = words.iter().find(|w| w.artist == "Sia").unwrap();
        assert_eq!(sia.songs, 3);
        assert!((sia.mean_words_used - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hit_songs_are_most_viewed_first() {
        let hits = hit_songs(&rows(), 2);
        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["Hello", "Chandelier"]);
    }

    #[test]
    fn epochs_align_to_multiples_of_the_span() {
        let epochs = words_per_epoch(&rows(), 10);
        let spans: Vec<(i32, i32, usize)> = epochs
            .iter()
            .map(|e| (e.start_year, e.end_year, e.songs))
            .collect();
        assert_eq!(spans, [(2000, 2009, 2), (2010, 2019, 3)]);
        assert!((epochs[1].mean_words_used - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn five_year_epochs() {
        let epochs = words_per_epoch(&rows(), 5);
        let starts: Vec<i32> = epochs.iter().map(|e| e.start_year).collect();
        assert_eq!(starts, [2000, 2005, 2010, 2015]);
    }
}
