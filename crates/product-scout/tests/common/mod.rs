// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Scripted stand-ins for the HTTP and browser collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use product_scout::acquisition::{FetchedPage, PageFetcher};
use product_scout::error::{FetchError, FetchResult, RenderError, RenderResult};
use product_scout::renderer::{NavigationResult, RenderSession, Renderer};
use product_scout::rendering::RenderSettings;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Render settings that do not sleep between scrolls.
pub fn fast_settings(max_scroll_attempts: usize) -> RenderSettings {
    RenderSettings {
        navigation_timeout: Duration::from_secs(1),
        link_wait_timeout: Duration::from_millis(10),
        scroll_settle: Duration::ZERO,
        max_scroll_attempts,
    }
}

/// Serves fixed HTML bodies by URL; unknown URLs fail with a 404.
#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    pub requests: Mutex<Vec<String>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for StaticPages {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                final_url: format!("{url}/"),
                status: 200,
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Panics for any URL containing `trigger`, otherwise serves one product link.
pub struct PanickingFetcher {
    pub trigger: &'static str,
}

#[async_trait]
impl PageFetcher for PanickingFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        if url.contains(self.trigger) {
            panic!("fetcher exploded on {url}");
        }
        Ok(FetchedPage {
            url: url.to_string(),
            final_url: url.to_string(),
            status: 200,
            body: format!(r#"<a href="{url}/product/1">p</a>"#),
        })
    }
}

/// Tracks how many fetches run at the same time.
#[derive(Default)]
pub struct SlowFetcher {
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[async_trait]
impl PageFetcher for SlowFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(25)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(FetchedPage {
            url: url.to_string(),
            final_url: url.to_string(),
            status: 200,
            body: format!(r#"<a href="{url}/p/1">p</a>"#),
        })
    }
}

/// Hangs on URLs containing `slow`; everything else gets one product link.
pub struct StallingFetcher {
    stall: Duration,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl StallingFetcher {
    pub fn new(stall: Duration) -> Self {
        Self {
            stall,
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StallingFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        if url.contains("slow") {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.stall).await;
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
        Ok(FetchedPage {
            url: url.to_string(),
            final_url: url.to_string(),
            status: 200,
            body: format!(r#"<a href="{url}/buy/1">b</a>"#),
        })
    }
}

/// Where a scripted session should fail, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Open,
    Navigation,
    /// The scroll script fails on this 1-based iteration.
    ScrollAt(usize),
}

/// Counters shared between a [`ScriptedRenderer`] and its sessions.
#[derive(Debug, Default)]
pub struct RenderStats {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub scrolls: AtomicUsize,
    pub link_queries: AtomicUsize,
}

impl RenderStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

/// A renderer whose pages reveal a scripted list of links per scroll.
///
/// `frames[i]` is what `query_links` returns after scroll `i + 1`; once the
/// script runs out, the last frame repeats.
pub struct ScriptedRenderer {
    frames: Vec<Vec<String>>,
    failure: Failure,
    pub stats: Arc<RenderStats>,
}

impl ScriptedRenderer {
    pub fn new(frames: Vec<Vec<String>>) -> Self {
        Self {
            frames,
            failure: Failure::None,
            stats: Arc::new(RenderStats::default()),
        }
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = failure;
        self
    }

    /// A page where every scroll reveals one more product link, forever.
    pub fn endless(max_frames: usize) -> Self {
        let frames = (1..=max_frames)
            .map(|n| {
                (1..=n)
                    .map(|i| format!("https://www.shop.test/product/{i}"))
                    .collect()
            })
            .collect();
        Self::new(frames)
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>> {
        if self.failure == Failure::Open {
            return Err(RenderError::Launch("no browser here".to_string()));
        }
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            frames: self.frames.clone(),
            failure: self.failure,
            scrolls: AtomicUsize::new(0),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct ScriptedSession {
    frames: Vec<Vec<String>>,
    failure: Failure,
    scrolls: AtomicUsize,
    stats: Arc<RenderStats>,
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> RenderResult<NavigationResult> {
        if self.failure == Failure::Navigation {
            return Err(RenderError::Navigation(format!("{url}: net::ERR_NAME_NOT_RESOLVED")));
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 1,
        })
    }

    async fn wait_for(&self, selector: &str, _timeout: Duration) -> RenderResult<()> {
        if self.frames.is_empty() {
            return Err(RenderError::Timeout(format!("selector {selector}")));
        }
        Ok(())
    }

    async fn execute_js(&self, _script: &str) -> RenderResult<serde_json::Value> {
        let n = self.scrolls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failure == Failure::ScrollAt(n) {
            return Err(RenderError::Script("Execution context was destroyed".to_string()));
        }
        self.stats.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::Value::Null)
    }

    async fn query_links(&self) -> RenderResult<Vec<String>> {
        self.stats.link_queries.fetch_add(1, Ordering::SeqCst);
        let n = self.scrolls.load(Ordering::SeqCst);
        let frame = n
            .checked_sub(1)
            .and_then(|i| self.frames.get(i).or_else(|| self.frames.last()))
            .cloned()
            .unwrap_or_default();
        Ok(frame)
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn links(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}
