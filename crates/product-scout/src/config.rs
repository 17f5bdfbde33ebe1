// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Crawl configuration and resolution.
//!
//! Values resolve in order: explicit (CLI flags, applied by the caller) →
//! `SCOUT_*` environment variables → built-in defaults.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Browser identity presented by both the static and the rendering tier.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_REPORT_PATH: &str = "crawl_results.txt";
/// Static-tier bodies are truncated past this size.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Everything tunable about a crawl.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Size of the worker pool; at most this many domains are in flight.
    pub workers: usize,

    /// Timeout for the single static GET.
    pub static_timeout: Duration,

    /// Bytes of a static response body that are read; the rest is discarded.
    pub max_body_bytes: usize,

    /// Upper bound on browser navigation.
    pub navigation_timeout: Duration,

    /// How long to wait for the first anchor to appear after navigation.
    pub link_wait_timeout: Duration,

    /// Pause after each scroll so lazy-loaded content can arrive.
    pub scroll_settle: Duration,

    /// Hard cap on scroll iterations per domain.
    pub max_scroll_attempts: usize,

    pub user_agent: String,

    /// Whether the rendering fallback may launch a browser at all.
    pub render: bool,

    /// Explicit Chromium binary. `None` means auto-detect.
    pub chromium_path: Option<PathBuf>,

    /// Where the text report is written after each crawl. `None` disables it.
    pub report_path: Option<PathBuf>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            static_timeout: Duration::from_secs(10),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            navigation_timeout: Duration::from_secs(30),
            link_wait_timeout: Duration::from_secs(15),
            scroll_settle: Duration::from_millis(2000),
            max_scroll_attempts: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            render: true,
            chromium_path: None,
            report_path: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
        }
    }
}

impl ScoutConfig {
    /// Defaults overlaid with any `SCOUT_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable source.
    ///
    /// Unparseable values are logged and skipped.
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = parse_var::<usize, _>(&lookup, "SCOUT_WORKERS") {
            self.workers = n.max(1);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SCOUT_STATIC_TIMEOUT_SECS") {
            self.static_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = parse_var::<usize, _>(&lookup, "SCOUT_MAX_BODY_BYTES") {
            self.max_body_bytes = n;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SCOUT_NAVIGATION_TIMEOUT_SECS") {
            self.navigation_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SCOUT_LINK_WAIT_SECS") {
            self.link_wait_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SCOUT_SCROLL_SETTLE_MS") {
            self.scroll_settle = Duration::from_millis(ms);
        }
        if let Some(n) = parse_var::<usize, _>(&lookup, "SCOUT_MAX_SCROLLS") {
            self.max_scroll_attempts = n;
        }
        if let Some(ua) = lookup("SCOUT_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            self.user_agent = ua;
        }
        if let Some(flag) = lookup("SCOUT_RENDER") {
            match parse_flag(&flag) {
                Some(render) => self.render = render,
                None => warn!("ignoring SCOUT_RENDER={flag:?}: expected a boolean"),
            }
        }
        if let Some(path) = lookup("SCOUT_CHROMIUM_PATH").filter(|v| !v.trim().is_empty()) {
            self.chromium_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("SCOUT_REPORT_PATH") {
            self.report_path = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
