// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Browser tier: scroll a rendered page until it stops revealing product links.

use crate::classifier::is_product_url;
use crate::config::ScoutConfig;
use crate::error::RenderResult;
use crate::renderer::{RenderSession, Renderer};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Triggers lazy-loading / infinite-scroll catalogs.
pub const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Anything that looks like a link.
pub const LINK_SELECTOR: &str = "a[href], a";

/// Timing and budget knobs for the scroll loop.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub navigation_timeout: Duration,
    pub link_wait_timeout: Duration,
    pub scroll_settle: Duration,
    pub max_scroll_attempts: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from(&ScoutConfig::default())
    }
}

impl From<&ScoutConfig> for RenderSettings {
    fn from(config: &ScoutConfig) -> Self {
        Self {
            navigation_timeout: config.navigation_timeout,
            link_wait_timeout: config.link_wait_timeout,
            scroll_settle: config.scroll_settle,
            max_scroll_attempts: config.max_scroll_attempts,
        }
    }
}

/// Product links accumulated across scroll iterations, first-seen order.
#[derive(Debug, Default)]
struct Accumulator {
    seen: HashSet<String>,
    urls: Vec<String>,
}

impl Accumulator {
    fn len(&self) -> usize {
        self.urls.len()
    }

    fn absorb(&mut self, links: Vec<String>) {
        for link in links {
            if is_product_url(&link) && self.seen.insert(link.clone()) {
                self.urls.push(link);
            }
        }
    }
}

/// Finds product links on pages that only render their catalog in a browser.
#[derive(Clone)]
pub struct RenderingFetcher {
    renderer: Arc<dyn Renderer>,
    settings: RenderSettings,
}

impl RenderingFetcher {
    pub fn new(renderer: Arc<dyn Renderer>, settings: RenderSettings) -> Self {
        Self { renderer, settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `url`, scroll until the product-link count stops growing (or
    /// the attempt budget runs out) and return every product link seen.
    ///
    /// Never fails: any browser error ends accumulation and whatever was
    /// collected so far is returned, possibly nothing. The session is closed
    /// before returning on every path.
    pub async fn fetch(&self, url: &str) -> Vec<String> {
        let mut session = match self.renderer.open_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!("rendering unavailable for {url}: {e}");
                return Vec::new();
            }
        };

        let mut found = Accumulator::default();
        let outcome = self.scroll_and_collect(session.as_mut(), url, &mut found).await;

        if let Err(e) = session.close().await {
            debug!("closing render session for {url} failed: {e}");
        }

        match outcome {
            Ok(iterations) => info!(
                "rendered {url}: {} product links after {iterations} scrolls",
                found.len()
            ),
            Err(e) => warn!(
                "rendering {url} stopped early with {} product links: {e}",
                found.len()
            ),
        }

        found.urls
    }

    /// The scroll loop. Returns the number of iterations run.
    async fn scroll_and_collect(
        &self,
        session: &mut dyn RenderSession,
        url: &str,
        found: &mut Accumulator,
    ) -> RenderResult<usize> {
        session.navigate(url, self.settings.navigation_timeout).await?;

        // Best effort: a page that never shows a link is still scrolled.
        if let Err(e) = session
            .wait_for(LINK_SELECTOR, self.settings.link_wait_timeout)
            .await
        {
            debug!("no links appeared on {url} before timeout: {e}");
        }

        let mut attempts = 0;
        while attempts < self.settings.max_scroll_attempts {
            let previous = found.len();

            session.execute_js(SCROLL_SCRIPT).await?;
            tokio::time::sleep(self.settings.scroll_settle).await;

            let links = session.query_links().await?;
            found.absorb(links);
            attempts += 1;

            debug!(
                "scroll {attempts} on {url}: {} product links ({} new)",
                found.len(),
                found.len() - previous
            );

            if found.len() == previous {
                break;
            }
        }

        Ok(attempts)
    }
}
