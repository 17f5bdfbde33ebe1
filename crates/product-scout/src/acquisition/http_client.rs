// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Async HTTP page fetching wrapping reqwest.
//!
//! Not a browser: one GET with a desktop-browser identity. Redirects are
//! followed and the final URL is reported so relative links resolve against
//! the page that was actually served. Bodies are truncated at a byte limit.
//! No retries.

use crate::config::{ScoutConfig, DEFAULT_MAX_BODY_BYTES};
use crate::error::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::debug;

/// A successfully retrieved HTML page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Originally requested URL.
    pub url: String,
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

/// Anything that can fetch a page for the static tier.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url`. Any non-2xx status is an error.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;
}

/// reqwest-backed [`PageFetcher`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpClient {
    /// Build a client presenting `user_agent`, bounded by `timeout` per request.
    pub fn new(user_agent: &str, timeout: Duration) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    /// Read at most `limit` bytes of each response body.
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn from_config(config: &ScoutConfig) -> FetchResult<Self> {
        Ok(Self::new(&config.user_agent, config.static_timeout)?
            .with_max_body_bytes(config.max_body_bytes))
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        let parsed =
            url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        let resp = self.client.get(parsed).send().await?;
        let status = resp.status();
        let final_url = resp.url().to_string();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: final_url,
                status: status.as_u16(),
            });
        }

        let body = read_capped(resp, self.max_body_bytes).await?;

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// Stream the body, keeping the first `limit` bytes. Invalid UTF-8 is
/// replaced rather than rejected.
async fn read_capped(mut resp: reqwest::Response, limit: usize) -> FetchResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        let room = limit - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            debug!("truncated body of {} at {limit} bytes", resp.url());
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
