// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Chromium-based renderer using chromiumoxide.
//!
//! Every session launches its own headless Chromium with a throw-away
//! profile directory, so concurrent sessions share nothing.

use super::{NavigationResult, RenderSession, Renderer};
use crate::config::ScoutConfig;
use crate::error::{RenderError, RenderResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Collects the resolved `href` of every anchor. `a.href` is already
/// absolute; SVG anchors expose an object instead of a string and are skipped.
const QUERY_LINKS_SCRIPT: &str = r#"
    Array.from(document.querySelectorAll('a'))
        .map(a => a.href)
        .filter(h => typeof h === 'string' && h.length > 0)
"#;

/// Find a Chromium binary on this machine.
pub fn find_chromium() -> Option<PathBuf> {
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Chromium-based renderer.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    user_agent: String,
    chrome_path: Option<PathBuf>,
}

impl ChromiumRenderer {
    /// `chrome_path` of `None` leaves binary detection to chromiumoxide.
    pub fn new(user_agent: impl Into<String>, chrome_path: Option<PathBuf>) -> Self {
        Self {
            user_agent: user_agent.into(),
            chrome_path,
        }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        let chrome_path = config.chromium_path.clone().or_else(find_chromium);
        Self::new(config.user_agent.clone(), chrome_path)
    }

    fn browser_config(&self, profile_dir: &Path) -> RenderResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .arg("--headless=new")
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg(format!("--user-agent={}", self.user_agent))
            .user_data_dir(profile_dir);

        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| RenderError::Launch(format!("failed to build browser config: {e}")))
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>> {
        let profile = tempfile::Builder::new()
            .prefix("product-scout-")
            .tempdir()
            .map_err(|e| RenderError::Launch(format!("failed to create profile dir: {e}")))?;

        let config = self.browser_config(profile.path())?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(format!("failed to launch Chromium: {e}")))?;

        // The CDP connection only makes progress while its handler is polled.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(RenderError::Launch(format!("failed to create new page: {e}")));
            }
        };

        Ok(Box::new(ChromiumSession {
            browser: Mutex::new(Some(browser)),
            page: Some(page),
            handler: Some(handler_task),
            _profile: profile,
        }))
    }
}

/// A single Chromium instance driving one page.
///
/// [`close`](RenderSession::close) shuts the browser down cleanly. If a
/// session is dropped without being closed, chromiumoxide kills the child
/// process on drop and the profile directory is removed with it.
pub struct ChromiumSession {
    // `Browser` is not `Sync`; sessions must be.
    browser: Mutex<Option<Browser>>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    _profile: TempDir,
}

impl ChromiumSession {
    fn page(&self) -> RenderResult<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| RenderError::Unavailable("session already closed".to_string()))
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> RenderResult<NavigationResult> {
        let start = Instant::now();
        let page = self.page()?;

        match tokio::time::timeout(timeout, page.goto(url)).await {
            Ok(Ok(_)) => {
                let final_url = page
                    .url()
                    .await
                    .ok()
                    .flatten()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| url.to_string());

                Ok(NavigationResult {
                    final_url,
                    load_time_ms: start.elapsed().as_millis() as u64,
                })
            }
            Ok(Err(e)) => Err(RenderError::Navigation(format!("{url}: {e}"))),
            Err(_) => Err(RenderError::Timeout(format!(
                "navigation to {url} after {}ms",
                timeout.as_millis()
            ))),
        }
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> RenderResult<()> {
        let page = self.page()?;

        let poll = async {
            loop {
                if page.find_element(selector).await.is_ok() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| RenderError::Timeout(format!("selector {selector}")))
    }

    async fn execute_js(&self, script: &str) -> RenderResult<serde_json::Value> {
        let result = self
            .page()?
            .evaluate(script)
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?;

        // Statements such as `window.scrollTo(..)` evaluate to undefined.
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn query_links(&self) -> RenderResult<Vec<String>> {
        let result = self
            .page()?
            .evaluate(QUERY_LINKS_SCRIPT)
            .await
            .map_err(|e| RenderError::Script(format!("link query failed: {e}")))?;

        result
            .into_value::<Vec<String>>()
            .map_err(|e| RenderError::Script(format!("failed to convert link list: {e:?}")))
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        let mut this = self;

        if let Some(page) = this.page.take() {
            if let Err(e) = page.close().await {
                debug!("page close failed: {e}");
            }
        }

        if let Some(mut browser) = this.browser.get_mut().take() {
            if let Err(e) = browser.close().await {
                debug!("browser close failed: {e}");
            }
            if let Err(e) = browser.wait().await {
                debug!("waiting for browser exit failed: {e}");
            }
        }

        if let Some(handler) = this.handler.take() {
            handler.abort();
        }

        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}
