//! Lyrics page scraper.
//!
//! Fetches a song's public web page, locates the element holding the
//! lyrics via CSS selector, and returns its text content verbatim,
//! including line breaks and bracketed section markers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};

use crate::{LyricsScraper, ScrapeError, build_client, fetch_page, parse_selector};

/// Default selector for the lyrics container on Genius song pages.
pub const DEFAULT_CONTAINER_SELECTOR: &str = "div.lyrics";

/// Scraper that extracts lyrics text from song pages.
#[derive(Debug, Clone)]
pub struct LyricsPageScraper {
    /// HTTP client with the configured default headers.
    client: reqwest::Client,
    /// CSS selector for the lyrics container element.
    container_selector: String,
}

impl LyricsPageScraper {
    /// Creates a scraper using [`DEFAULT_CONTAINER_SELECTOR`].
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_headers(&BTreeMap::new())
    }

    /// Creates a scraper that sends the given headers with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if a header is invalid or the client cannot
    /// be built.
    pub fn with_headers(headers: &BTreeMap<String, String>) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_client(headers)?,
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_owned(),
        })
    }

    /// Overrides the CSS selector used to locate the lyrics container.
    #[must_use]
    pub fn with_container_selector(mut self, selector: &str) -> Self {
        selector.clone_into(&mut self.container_selector);
        self
    }

    /// Returns the configured container selector.
    #[must_use]
    pub fn container_selector(&self) -> &str {
        &self.container_selector
    }
}

#[async_trait]
impl LyricsScraper for LyricsPageScraper {
    async fn scrape_lyrics(&self, url: &str) -> Result<String, ScrapeError> {
        let selector = parse_selector(&self.container_selector)?;
        let body = fetch_page(&self.client, url).await?;

        extract_lyrics(&body, &selector).ok_or_else(|| ScrapeError::MissingElement {
            selector: self.container_selector.clone(),
            url: url.to_owned(),
        })
    }
}

/// Returns the text of the first element matching `selector`, or `None`
/// if the page has no such element.
#[must_use]
pub fn extract_lyrics(html: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    document.select(selector).next().map(element_text)
}

/// Concatenates all text below `element`, turning `<br>` into newlines.
fn element_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}
