// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Product Scout: discovers product detail URLs on e-commerce sites.
//!
//! Each domain is fetched once as static HTML. When that pass finds no
//! product links, a headless Chromium session scrolls the page to trigger
//! lazy-loaded catalogs and collects the links that appear. Many domains are
//! crawled concurrently through a bounded worker pool; one domain failing
//! never affects the others.
//!
//! ```no_run
//! use product_scout::{Coordinator, ScoutConfig};
//!
//! # async fn run() {
//! let coordinator = Coordinator::from_config(&ScoutConfig::default()).unwrap();
//! let results = coordinator
//!     .crawl(&["example.com".to_string(), "shop.test".to_string()])
//!     .await;
//! for (domain, urls) in &results {
//!     println!("{domain}: {} product urls", urls.len());
//! }
//! # }
//! ```

pub mod acquisition;
pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod renderer;
pub mod rendering;
pub mod report;
pub mod types;

pub use classifier::{is_product_url, is_product_url_opt};
pub use config::ScoutConfig;
pub use coordinator::Coordinator;
pub use discovery::{normalize_domain, Discoverer};
pub use error::{FetchError, RenderError, ReportError, StaticFetchError};
pub use types::{AggregateResult, ProductUrls};
