// src/crawl/fetch.rs
// =============================================================================
// This module fetches pages and decides whether they are worth parsing.
//
// The crawler talks to the network through two small traits:
// - Fetch: "GET this URL" -> a response (or NoResponse)
// - PageResponse: status code, headers, and the body as text
//
// HttpFetcher is the real implementation on top of reqwest. Tests plug in
// an in-memory site instead, so the crawl logic can run without a network.
//
// A fetched page is only parsed for links when:
// - the status code is below 400
// - the content-type header says text/html
// =============================================================================

use anyhow::{Context, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a page could not be used. Each variant stops only the branch of
/// the crawl that hit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no response from {url}: {reason}")]
    NoResponse { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    BadStatus { url: String, status: u16 },

    #[error("{url} has unsupported content type '{content_type}'")]
    UnsupportedContentType { url: String, content_type: String },
}

/// A response whose body has not been read yet.
pub trait PageResponse: Send {
    fn status(&self) -> u16;

    /// Header lookup, case-insensitive on `name`.
    fn header(&self, name: &str) -> Option<String>;

    /// Reads the whole body as text. This can fail on its own, after a
    /// perfectly good status line.
    fn text(self) -> BoxFuture<'static, Result<String>>;
}

/// Something that can GET a URL.
pub trait Fetch {
    type Response: PageResponse;

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Self::Response, FetchError>>;
}

// Checks status and content type of a response
//
// Returns: Ok(()) if the body should be read and parsed for links
pub fn validate<R: PageResponse>(url: &str, response: &R) -> Result<(), FetchError> {
    let status = response.status();
    if status >= 400 {
        return Err(FetchError::BadStatus {
            url: url.to_string(),
            status,
        });
    }

    // A missing header counts as "not HTML"; media types are case-insensitive
    let content_type = response.header("content-type").unwrap_or_default();
    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(FetchError::UnsupportedContentType {
            url: url.to_string(),
            content_type,
        });
    }

    Ok(())
}

// The real fetcher, backed by one reusable reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // One client for the whole crawl (connection pooling).
        // The timeout turns a stalled host into a NoResponse failure
        // instead of hanging the crawl forever.
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("page-tally/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client })
    }
}

pub struct HttpResponse(reqwest::Response);

impl PageResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.0
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    fn text(self) -> BoxFuture<'static, Result<String>> {
        Box::pin(async move {
            let body = self.0.text().await.context("failed to read response body")?;
            Ok(body)
        })
    }
}

impl Fetch for HttpFetcher {
    type Response = HttpResponse;

    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<HttpResponse, FetchError>> {
        Box::pin(async move {
            self.client
                .get(url)
                .send()
                .await
                .map(HttpResponse)
                .map_err(|e| FetchError::NoResponse {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
        })
    }
}
