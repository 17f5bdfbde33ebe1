// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `Renderer` and `RenderSession` traits that abstract over the
//! browser engine (currently Chromium via chromiumoxide).

pub mod chromium;

use crate::error::{RenderError, RenderResult};
use async_trait::async_trait;
use std::time::Duration;

/// Result of navigating to a URL.
#[derive(Debug, Clone)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that hands out rendering sessions.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a fresh session owned exclusively by the caller.
    ///
    /// The caller must [`close`](RenderSession::close) it when done.
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>>;
}

/// One live page in a browser.
#[async_trait]
pub trait RenderSession: Send + Sync {
    /// Navigate to a URL, giving up after `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> RenderResult<NavigationResult>;

    /// Wait until an element matching `selector` exists in the DOM.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> RenderResult<()>;

    /// Execute JavaScript in the page context and return the result.
    async fn execute_js(&self, script: &str) -> RenderResult<serde_json::Value>;

    /// Resolved `href` of every anchor currently in the DOM.
    async fn query_links(&self) -> RenderResult<Vec<String>>;

    /// Release the session and everything it holds.
    async fn close(self: Box<Self>) -> RenderResult<()>;
}

/// A renderer that never renders, used when the browser tier is disabled.
///
/// The static tier works without a browser; with this renderer the fallback
/// simply contributes nothing.
pub struct NoopRenderer;

#[async_trait]
impl Renderer for NoopRenderer {
    async fn open_session(&self) -> RenderResult<Box<dyn RenderSession>> {
        Err(RenderError::Unavailable(
            "rendering disabled, HTTP-only mode".to_string(),
        ))
    }
}
