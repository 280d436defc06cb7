#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Web page scrapers for song lyrics and artist lists.
//!
//! Provides the [`LyricsScraper`] trait with its HTML implementation
//! ([`lyrics_page`]) and a scraper that collects artist names from a
//! list page ([`artist_list`]).
//!
//! Both scrapers split fetching from extraction: the `extract_*`
//! functions work on an HTML string and never touch the network.

pub mod artist_list;
pub mod lyrics_page;

use std::collections::BTreeMap;

use async_trait::async_trait;
use scraper::Selector;

pub use artist_list::ArtistListScraper;
pub use lyrics_page::LyricsPageScraper;

/// Errors that can occur during scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Parsing the response body or a selector failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The page does not contain the expected element.
    #[error("no element matching '{selector}' found at {url}")]
    MissingElement {
        /// The CSS selector that matched nothing.
        selector: String,
        /// The page that was scraped.
        url: String,
    },
}

/// Something that can turn a song page URL into lyrics text.
#[async_trait]
pub trait LyricsScraper: Send + Sync {
    /// Fetches the page at `url` and returns its lyrics text verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the page cannot be fetched or does not
    /// contain a lyrics container.
    async fn scrape_lyrics(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Builds a [`reqwest::Client`] with the given default headers.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] for invalid header names or values and
/// [`ScrapeError::Http`] if the client cannot be built.
pub fn build_client(headers: &BTreeMap<String, String>) -> Result<reqwest::Client, ScrapeError> {
    let mut header_map = reqwest::header::HeaderMap::new();
    for (key, value) in headers {
        let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| ScrapeError::Parse(format!("invalid header name '{key}': {e}")))?;
        let val = reqwest::header::HeaderValue::from_str(value)
            .map_err(|e| ScrapeError::Parse(format!("invalid header value '{value}': {e}")))?;
        header_map.insert(name, val);
    }
    reqwest::Client::builder()
        .default_headers(header_map)
        .build()
        .map_err(ScrapeError::Http)
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the selector is invalid.
pub fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{selector}': {e}")))
}

/// Fetches a page body as text, failing on non-success statuses.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the request fails.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    log::debug!("Fetching page {url}");
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_selectors() {
        assert!(matches!(parse_selector("div[["), Err(ScrapeError::Parse(_))));
        assert!(parse_selector("div.lyrics").is_ok());
    }

    #[test]
    fn rejects_invalid_header_names() {
        let mut headers = BTreeMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(build_client(&headers), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn builds_client_with_valid_headers() {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), "atemlos-test".to_string());
        assert!(build_client(&headers).is_ok());
    }
}
