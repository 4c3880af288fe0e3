// src/crawl/fetch.rs
// =============================================================================
// Downloads one page.
//
// One GET, no retry. Anything other than a 2xx answer is a FetchError that
// carries the URL, the status (when there was one) and the cause.
// Redirects are followed by the client before we ever see a status.
// =============================================================================

use reqwest::Client;
use tracing::info;
use url::Url;

use crate::error::FetchError;

// Parses a seed into an absolute URL
//
// Relative strings ("/about", "example.com") are rejected here, before any
// network traffic. So are seeds with tabs or line breaks: Url::parse would
// silently drop them, but the seed is written verbatim as the source column.
pub fn parse_seed(seed: &str) -> Result<Url, FetchError> {
    if seed.contains(['\t', '\r', '\n']) {
        return Err(FetchError::ControlCharacter {
            url: seed.to_string(),
        });
    }

    Url::parse(seed).map_err(|source| FetchError::InvalidUrl {
        url: seed.to_string(),
        source,
    })
}

// Fetches a web page and returns its body as text
//
// The body is decoded using the charset from Content-Type (UTF-8 if absent).
pub async fn fetch(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    info!(url = %url, status = status.as_u16(), "response received");

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::test_server::{test_client, StubServer};
    use reqwest::StatusCode;

    #[test]
    fn test_parse_seed_rejects_relative() {
        let err = parse_seed("/about").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert_eq!(err.url(), "/about");
    }

    #[test]
    fn test_parse_seed_rejects_tab_and_line_breaks() {
        for seed in ["http://a.test/a\tb", "http://a.test/a\nb", "http://a.test/a\r"] {
            let err = parse_seed(seed).unwrap_err();
            assert!(matches!(err, FetchError::ControlCharacter { .. }), "seed {seed:?}");
            assert_eq!(err.url(), seed);
            assert_eq!(err.status(), None);
        }
    }

    #[test]
    fn test_parse_seed_accepts_absolute() {
        let url = parse_seed("https://example.com/a?b=c").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a?b=c");
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = StubServer::start().await;
        server.route("/page", 200, "<a href=\"/x\">x</a>");

        let url = parse_seed(&server.url("/page")).unwrap();
        let body = fetch(&test_client(), &url).await.unwrap();
        assert_eq!(body, "<a href=\"/x\">x</a>");
    }

    #[tokio::test]
    async fn test_fetch_server_error_carries_status() {
        let server = StubServer::start().await;
        server.route("/boom", 500, "oops");

        let url = parse_seed(&server.url("/boom")).unwrap();
        let err = fetch(&test_client(), &url).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.url(), url.as_str());
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = StubServer::start().await;

        let url = parse_seed(&server.url("/missing")).unwrap();
        let err = fetch(&test_client(), &url).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let url = parse_seed(&StubServer::closed_url().await).unwrap();
        let err = fetch(&test_client(), &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(err.status(), None);
    }
}
