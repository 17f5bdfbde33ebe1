// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Static tier: one GET, classify the page's links.

use super::http_client::PageFetcher;
use super::links::extract_links;
use crate::classifier::is_product_url;
use crate::error::StaticFetchError;
use crate::types::ProductUrls;
use std::sync::Arc;
use tracing::debug;

/// Finds product links in a page's server-rendered HTML.
#[derive(Clone)]
pub struct StaticFetcher {
    fetcher: Arc<dyn PageFetcher>,
}

impl StaticFetcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and return the product links found in its HTML.
    ///
    /// An empty match set is reported as
    /// [`StaticFetchError::NoProductLinks`], never as an empty `Ok`: a page
    /// with no product links in its raw HTML is the signal that the catalog
    /// is rendered client-side and the browser tier should run.
    pub async fn fetch(&self, url: &str) -> Result<ProductUrls, StaticFetchError> {
        let page = self.fetcher.fetch(url).await?;
        let final_url = page.final_url;
        let body = page.body;

        // scraper's DOM is not Send; keep it off the async executor.
        let base = final_url.clone();
        let links = tokio::task::spawn_blocking(move || extract_links(&body, &base))
            .await
            .map_err(|e| StaticFetchError::Parse(e.to_string()))?;

        let links_seen = links.len();
        let matches: ProductUrls = links
            .into_iter()
            .filter(|link| is_product_url(link))
            .collect();

        debug!(
            "static fetch of {final_url}: {links_seen} links, {} product links",
            matches.len()
        );

        if matches.is_empty() {
            return Err(StaticFetchError::NoProductLinks {
                url: final_url,
                links_seen,
            });
        }

        Ok(matches)
    }
}
