// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Per-domain discovery: static tier first, browser tier when it finds nothing.

use crate::acquisition::{HttpClient, PageFetcher, StaticFetcher};
use crate::config::ScoutConfig;
use crate::error::FetchResult;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::{NoopRenderer, Renderer};
use crate::rendering::{RenderSettings, RenderingFetcher};
use crate::types::ProductUrls;
use std::sync::Arc;
use tracing::info;

/// Turn a submitted domain into the URL that is actually requested.
///
/// - surrounding whitespace is trimmed;
/// - anything containing `://` is already a URL and is used verbatim;
/// - a host starting with `www.` gets `https://` prepended;
/// - everything else gets `https://www.` prepended, so `example.com`
///   becomes `https://www.example.com`.
pub fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim();
    if domain.contains("://") {
        domain.to_string()
    } else if domain
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."))
    {
        format!("https://{domain}")
    } else {
        format!("https://www.{domain}")
    }
}

/// Runs the two-tier discovery for a single domain.
#[derive(Clone)]
pub struct Discoverer {
    static_fetcher: StaticFetcher,
    rendering_fetcher: RenderingFetcher,
}

impl Discoverer {
    pub fn new(static_fetcher: StaticFetcher, rendering_fetcher: RenderingFetcher) -> Self {
        Self {
            static_fetcher,
            rendering_fetcher,
        }
    }

    /// Assemble a discoverer from explicit collaborators.
    pub fn with_backends(
        fetcher: Arc<dyn PageFetcher>,
        renderer: Arc<dyn Renderer>,
        settings: RenderSettings,
    ) -> Self {
        Self::new(
            StaticFetcher::new(fetcher),
            RenderingFetcher::new(renderer, settings),
        )
    }

    /// reqwest for the static tier; Chromium for the browser tier unless
    /// `config.render` is off.
    pub fn from_config(config: &ScoutConfig) -> FetchResult<Self> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpClient::from_config(config)?);
        let renderer: Arc<dyn Renderer> = if config.render {
            Arc::new(ChromiumRenderer::from_config(config))
        } else {
            Arc::new(NoopRenderer)
        };
        Ok(Self::with_backends(
            fetcher,
            renderer,
            RenderSettings::from(config),
        ))
    }

    /// Normalise `domain` and discover its product URLs. A blank domain
    /// yields an empty set without touching the network.
    pub async fn discover(&self, domain: &str) -> ProductUrls {
        if domain.trim().is_empty() {
            return ProductUrls::new();
        }
        self.discover_url(&normalize_domain(domain)).await
    }

    /// Discover product URLs starting from an already-normalised URL.
    ///
    /// Never fails. When the static tier errors or finds no product links,
    /// the browser tier runs exactly once and its results are merged in.
    pub async fn discover_url(&self, url: &str) -> ProductUrls {
        if url.trim().is_empty() {
            return ProductUrls::new();
        }

        let mut found = match self.static_fetcher.fetch(url).await {
            Ok(urls) => {
                info!("static fetch of {url} found {} product urls", urls.len());
                return urls;
            }
            Err(e) => {
                info!("static fetch of {url} gave nothing ({e}), rendering instead");
                ProductUrls::new()
            }
        };

        found.extend(self.rendering_fetcher.fetch(url).await);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_www_and_scheme() {
        assert_eq!(normalize_domain("example.com"), "https://www.example.com");
        assert_eq!(normalize_domain("  shop.test \n"), "https://www.shop.test");
    }

    #[test]
    fn test_www_host_gets_scheme_only() {
        assert_eq!(normalize_domain("www.example.com"), "https://www.example.com");
        assert_eq!(normalize_domain("WWW.Example.com"), "https://WWW.Example.com");
    }

    #[test]
    fn test_full_url_is_untouched() {
        assert_eq!(
            normalize_domain("http://shop.test/catalog"),
            "http://shop.test/catalog"
        );
        assert_eq!(normalize_domain("https://shop.test"), "https://shop.test");
    }

    #[test]
    fn test_short_and_multibyte_inputs() {
        assert_eq!(normalize_domain("ww"), "https://www.ww");
        assert_eq!(normalize_domain("ünï.test"), "https://www.ünï.test");
    }
}
