// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Multi-domain crawling over a bounded worker pool.
//!
//! Each domain becomes one task. Tasks queue on the coordinator's semaphore,
//! so no more than `workers` discoveries (and therefore browser sessions)
//! run at once no matter how long the domain list is. Results land in a
//! shared concurrent map keyed by the domain string the caller submitted.
//! The tasks live in a [`JoinSet`]: dropping a `crawl` future part-way
//! aborts its discoveries and returns their permits to the pool.

use crate::config::ScoutConfig;
use crate::discovery::{normalize_domain, Discoverer};
use crate::error::FetchResult;
use crate::types::{AggregateResult, ProductUrls};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Fans a domain list out across a fixed-size worker pool.
///
/// The pool belongs to this coordinator and is shared by every
/// [`crawl`](Self::crawl) made through it, so concurrent batches on one
/// coordinator still respect the same bound.
pub struct Coordinator {
    discoverer: Arc<Discoverer>,
    pool: Arc<Semaphore>,
    workers: usize,
}

impl Coordinator {
    /// `workers` below 1 is raised to 1.
    pub fn new(discoverer: Discoverer, workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            discoverer: Arc::new(discoverer),
            pool: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    pub fn from_config(config: &ScoutConfig) -> FetchResult<Self> {
        Ok(Self::new(Discoverer::from_config(config)?, config.workers))
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn discoverer(&self) -> &Discoverer {
        &self.discoverer
    }

    /// Discover product URLs for every domain and wait for all of them.
    ///
    /// The returned map has exactly one entry per distinct input domain,
    /// keyed by the domain string as given. A domain whose discovery fails
    /// or panics maps to an empty set; nothing here can fail the batch.
    pub async fn crawl(&self, domains: &[String]) -> AggregateResult {
        if domains.is_empty() {
            return AggregateResult::new();
        }

        let start = Instant::now();
        let results: Arc<DashMap<String, ProductUrls>> = Arc::new(DashMap::new());
        let mut dispatched: HashSet<&str> = HashSet::new();
        let mut tasks = JoinSet::new();

        for domain in domains {
            if !dispatched.insert(domain.as_str()) {
                continue;
            }
            if domain.trim().is_empty() {
                warn!("skipping blank domain");
                results.insert(domain.clone(), ProductUrls::new());
                continue;
            }

            let target = normalize_domain(domain);
            let key = domain.clone();
            let discoverer = Arc::clone(&self.discoverer);
            let pool = Arc::clone(&self.pool);
            let results = Arc::clone(&results);

            tasks.spawn(async move {
                let Ok(_permit) = pool.acquire_owned().await else {
                    warn!("worker pool closed before {key} could run");
                    return;
                };
                let urls = discoverer.discover_url(&target).await;
                results.insert(key, urls);
            });
        }

        info!(
            "crawling {} domains with {} workers",
            tasks.len(),
            self.workers
        );

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("discovery task failed: {e}");
            }
        }

        for domain in domains {
            results.entry(domain.clone()).or_default();
        }

        let results = Arc::try_unwrap(results).unwrap_or_else(|shared| (*shared).clone());
        let found: usize = results.iter().map(|entry| entry.value().len()).sum();
        info!(
            "crawl of {} domains finished in {:.1}s with {found} product urls",
            results.len(),
            start.elapsed().as_secs_f64()
        );

        results.into_iter().collect()
    }
}
