//! HTTP implementation of [`LyricsApi`] against the Genius REST API.
//!
//! Requests are sent one at a time and never retried; pacing between
//! requests is the caller's job.

use async_trait::async_trait;
use atemlos_song_models::SongMetadata;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::{GeniusError, LyricsApi, SongIdPage, dto};

/// Production API root.
pub const API_BASE_URL: &str = "https://api.genius.com";

/// Genius API client authenticated with a static bearer token.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeniusClient {
    /// Creates a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns [`GeniusError::Config`] if the token is not a valid header
    /// value, or [`GeniusError::Http`] if the HTTP client cannot be built.
    pub fn new(access_token: &str) -> Result<Self, GeniusError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| GeniusError::Config(format!("invalid access token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("atemlos/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different API root (e.g. a local stub).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        base_url.trim_end_matches('/').clone_into(&mut self.base_url);
        self
    }

    /// Returns the API root this client sends requests to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an endpoint path.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a GET request and returns the body of a successful response.
    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, GeniusError> {
        let url = self.endpoint_url(path);
        log::debug!("GET {url} {query:?}");

        let body = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(body)
    }
}

#[async_trait]
impl LyricsApi for GeniusClient {
    async fn resolve_artist_id(&self, name: &str) -> Result<Option<u64>, GeniusError> {
        let path = "/search";
        let body = self.get_text(path, &[("q", name.to_string())]).await?;
        let response: dto::SearchResponse = crate::decode(path, &body)?;

        let artist_id = crate::match_artist_id(&response, name);
        log::debug!(
            "Artist '{name}': {} hits, resolved to {artist_id:?}",
            response.hits.len()
        );
        Ok(artist_id)
    }

    async fn song_ids_page(
        &self,
        artist_id: u64,
        per_page: u32,
        page: u32,
    ) -> Result<SongIdPage, GeniusError> {
        let path = format!("/artists/{artist_id}/songs");
        let query = [
            ("sort", "popularity".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        let body = self.get_text(&path, &query).await?;
        let response: dto::ArtistSongsResponse = crate::decode(&path, &body)?;

        let listed = response.songs.len();
        let page_ids = crate::primary_song_page(response, artist_id);
        log::debug!(
            "Artist {artist_id} page {page}: {}/{listed} songs as primary artist, next page {:?}",
            page_ids.songs.len(),
            page_ids.next_page
        );
        Ok(page_ids)
    }

    async fn song_data(&self, song_id: u64) -> Result<SongMetadata, GeniusError> {
        let path = format!("/songs/{song_id}");
        let body = self.get_text(&path, &[]).await?;
        let response: dto::SongResponse = crate::decode(&path, &body)?;
        Ok(crate::song_metadata(response.song))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serves one canned JSON response on a local port and returns the
    /// base URL plus a handle yielding the raw request head.
    async fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8(request).unwrap().to_lowercase()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn song_page_request_carries_paging_and_bearer_token() {
        let (base_url, server) = serve_once(
            r#"{"response": {"songs": [
                {"id": 378195, "primary_artist": {"id": 16775, "name": "Sia"}},
                {"id": 90000, "primary_artist": {"id": 111, "name": "David Guetta"}}
            ], "next_page": 4}}"#,
        )
        .await;
        let client = GeniusClient::new("secret-token")
            .unwrap()
            .with_base_url(&base_url);

        let page = client.song_ids_page(16775, 20, 3).await.unwrap();
        let request = server.await.unwrap();

        assert!(
            request.starts_with("get /artists/16775/songs?sort=popularity&per_page=20&page=3 http/1.1"),
            "{request}"
        );
        assert!(request.contains("authorization: bearer secret-token"), "{request}");
        assert_eq!(
            page.songs,
            [atemlos_song_models::SongReference {
                song_id: 378_195,
                artist_id: 16775
            }]
        );
        assert_eq!(page.next_page, Some(4));
    }

    #[tokio::test]
    async fn search_request_sends_the_artist_name_as_query() {
        let (base_url, server) = serve_once(
            r#"{"response": {"hits": [
                {"result": {"id": 7, "primary_artist": {"id": 35297, "name": "Helene Fischer"}}}
            ]}}"#,
        )
        .await;
        let client = GeniusClient::new("secret-token")
            .unwrap()
            .with_base_url(&base_url);

        let artist_id = client.resolve_artist_id("Helene Fischer").await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("get /search?q=helene+fischer http/1.1"), "{request}");
        assert_eq!(artist_id, Some(35297));
    }

    #[test]
    fn client_defaults_to_production_api() {
        let client = GeniusClient::new("token").unwrap();
        assert_eq!(client.base_url(), API_BASE_URL);
        assert_eq!(
            client.endpoint_url("/songs/378195"),
            "https://api.genius.com/songs/378195"
        );
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let client = GeniusClient::new("token")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080/");
        assert_eq!(client.endpoint_url("/search"), "http://127.0.0.1:8080/search");
    }

    #[test]
    fn rejects_tokens_that_are_not_header_safe() {
        let err = GeniusClient::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, GeniusError::Config(_)));
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() {
        let client = GeniusClient::new("token")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let err = client.song_data(1).await.unwrap_err();
        assert!(matches!(err, GeniusError::Http(_)));
    }
}
