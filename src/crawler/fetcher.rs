//! HTTP fetcher
//!
//! Builds the shared HTTP client and fetches single pages. Redirects are
//! followed by the client so the response URL is the final URL after the
//! whole chain; redirect loops and over-long chains surface as reqwest
//! errors and are classified like any other network failure.

use crate::{Result, SitecheckError};
use reqwest::Client;
use std::time::Duration;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Raw response body
    pub body: String,
}

/// Builds the HTTP client shared by one run
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value sent on every fetch
pub fn build_http_client(user_agent: &str) -> Result<Client> {
    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;
    Ok(client)
}

/// Fetches one page, following redirects
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with its body and final URL
/// * `Err(SitecheckError::HttpStatus)` - non-2xx response
/// * `Err(SitecheckError::Fetch)` - network error, timeout, redirect loop
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(SitecheckError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Maps a reqwest error to a fetch error with a stable, readable reason
fn classify_error(url: &str, error: reqwest::Error) -> SitecheckError {
    let reason = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_redirect() {
        "redirect loop or too many redirects".to_string()
    } else {
        error.to_string()
    };

    SitecheckError::Fetch {
        url: url.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client("sitecheck-test/1.0").is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success_carries_status_and_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string("<html><body>ok</body></html>"),
            )
            .mount(&server)
            .await;

        let client = build_http_client("sitecheck-test/1.0").unwrap();
        let page = fetch_page(&client, &format!("{}/", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.status_code, 200);
        assert_eq!(page.body, "<html><body>ok</body></html>");
        assert!(page.final_url.starts_with(&server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_fetch_error() {
        let client = build_http_client("sitecheck-test/1.0").unwrap();
        // Reserved TLD, never resolves
        let result = fetch_page(&client, "http://unreachable.invalid/").await;
        match result {
            Err(SitecheckError::Fetch { url, reason }) => {
                assert_eq!(url, "http://unreachable.invalid/");
                assert!(!reason.is_empty());
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }
}
