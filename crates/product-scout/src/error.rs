// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Error types for every recoverable failure in the discovery pipeline.
//!
//! None of these ever escape a [`Coordinator::crawl`](crate::Coordinator::crawl)
//! call. They exist so each fallback point can inspect *why* a tier failed.

/// Failure to retrieve a page over plain HTTP.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Why the static tier produced nothing usable.
#[derive(thiserror::Error, Debug)]
pub enum StaticFetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] FetchError),

    /// The page loaded and parsed, but none of its links looked like
    /// product pages. Treated exactly like a transport failure.
    #[error("no product links among {links_seen} links on {url}")]
    NoProductLinks { url: String, links_seen: usize },

    #[error("HTML parse task failed: {0}")]
    Parse(String),
}

/// Errors raised by a browser rendering session.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    Script(String),

    #[error("Browser not available: {0}")]
    Unavailable(String),
}

/// Failure to persist a crawl report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;
pub type RenderResult<T> = Result<T, RenderError>;
