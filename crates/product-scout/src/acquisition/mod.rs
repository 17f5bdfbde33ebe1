// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Static (no-browser) acquisition tier.
//!
//! One HTTP GET per domain, links pulled out of the raw HTML, product links
//! kept. The browser tier only runs when this one comes back empty.

pub mod http_client;
pub mod links;
pub mod static_fetch;

pub use http_client::{FetchedPage, HttpClient, PageFetcher};
pub use links::extract_links;
pub use static_fetch::StaticFetcher;
