//! Artist list scraper.
//!
//! Collects artist names from a list page (for example a Wikipedia
//! "list of artists" article) so a run can be seeded without typing every
//! name into the config file.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::{ScrapeError, build_client, fetch_page, parse_selector};

/// Default selector for list entries.
pub const DEFAULT_ITEM_SELECTOR: &str = "li";

/// Whitespace followed by a non-word character other than `&` starts the
/// annotation part of an entry, e.g. `" (* 1966)"` or `" – singer"`.
static ANNOTATION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s[^\w&]").expect("annotation regex is valid")
});

/// Scraper that turns a list page into artist names.
#[derive(Debug, Clone)]
pub struct ArtistListScraper {
    client: reqwest::Client,
    url: String,
    item_selector: String,
    limit: Option<usize>,
}

impl ArtistListScraper {
    /// Creates a scraper for the page at `url` using [`DEFAULT_ITEM_SELECTOR`].
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_client(&BTreeMap::new())?,
            url: url.to_owned(),
            item_selector: DEFAULT_ITEM_SELECTOR.to_owned(),
            limit: None,
        })
    }

    /// Overrides the CSS selector for list entries.
    #[must_use]
    pub fn with_item_selector(mut self, selector: &str) -> Self {
        selector.clone_into(&mut self.item_selector);
        self
    }

    /// Caps the number of names returned.
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Fetches the page and extracts cleaned, de-duplicated artist names.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the selector is invalid, the page cannot
    /// be fetched, or no entry yields a name.
    pub async fn fetch_artist_names(&self) -> Result<Vec<String>, ScrapeError> {
        let selector = parse_selector(&self.item_selector)?;
        let body = fetch_page(&self.client, &self.url).await?;

        let names = extract_artist_names(&body, &selector, self.limit);
        if names.is_empty() {
            return Err(ScrapeError::MissingElement {
                selector: self.item_selector.clone(),
                url: self.url.clone(),
            });
        }

        log::info!("Found {} artists at {}", names.len(), self.url);
        Ok(names)
    }
}

/// Extracts artist names from every element matching `selector`, in page
/// order, skipping blanks and repeats.
#[must_use]
pub fn extract_artist_names(html: &str, selector: &Selector, limit: Option<usize>) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = BTreeSet::new();

    document
        .select(selector)
        .filter_map(|item| {
            let text: String = item.text().collect();
            clean_artist_name(&text)
        })
        .filter(|name| seen.insert(name.clone()))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Strips the annotation from a list entry, returning `None` if nothing
/// is left.
///
/// `"Andrea Berg (* 1966)"` becomes `"Andrea Berg"`, while
/// `"Simon & Garfunkel"` is kept whole.
#[must_use]
pub fn clean_artist_name(entry: &str) -> Option<String> {
    let line = entry.trim().lines().next().unwrap_or_default();
    let name = ANNOTATION_START
        .find(line)
        .map_or(line, |m| &line[..m.start()])
        .trim();

    (!name.is_empty()).then(|| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"<html><body>
<ul>
  <li><a href="/wiki/Andrea_Berg">Andrea Berg</a> (* 1966), Sängerin</li>
  <li><a href="/wiki/Helene_Fischer">Helene Fischer</a> – Schlager</li>
  <li>Simon &amp; Garfunkel</li>
  <li>Andrea Berg (* 1966)</li>
  <li>   </li>
  <li>Roland Kaiser</li>
</ul>
</body></html>"#;

    #[test]
    fn strips_parenthesised_annotations() {
        assert_eq!(
            clean_artist_name("Andrea Berg (* 1966)").as_deref(),
            Some("Andrea Berg")
        );
    }

    #[test]
    fn keeps_ampersand_names() {
        assert_eq!(
            clean_artist_name("Simon & Garfunkel").as_deref(),
            Some("Simon & Garfunkel")
        );
    }

    #[test]
    fn strips_dash_annotations_and_keeps_first_line() {
        assert_eq!(
            clean_artist_name("Helene Fischer – Schlager\nmore").as_deref(),
            Some("Helene Fischer")
        );
    }

    #[test]
    fn blank_entries_are_dropped() {
        assert_eq!(clean_artist_name("   "), None);
        assert_eq!(clean_artist_name("\n \n"), None);
    }

    #[test]
    fn extracts_unique_names_in_page_order() {
        let selector = parse_selector("li").unwrap();
        let names = extract_artist_names(LIST_PAGE, &selector, None);
        assert_eq!(
            names,
            ["Andrea Berg", "Helene Fischer", "Simon & Garfunkel", "Roland Kaiser"]
        );
    }

    #[test]
    fn limit_caps_the_result() {
        let selector = parse_selector("li").unwrap();
        let names = extract_artist_names(LIST_PAGE, &selector, Some(2));
        assert_eq!(names, ["Andrea Berg", "Helene Fischer"]);
    }

    #[tokio::test]
    async fn unreachable_page_is_an_http_error() {
        let scraper = ArtistListScraper::new("http://127.0.0.1:9/list").unwrap();
        let err = scraper.fetch_artist_names().await.unwrap_err();
        assert!(matches!(err, ScrapeError::Http(_)));
    }
}
