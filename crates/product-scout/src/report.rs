// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Plain-text crawl reports.
//!
//! ```text
//! Domain: example.com
//! 	https://www.example.com/product/1
//! 	https://www.example.com/product/2
//!
//! Domain: shop.test
//!
//! ```

use crate::error::ReportError;
use crate::types::AggregateResult;
use std::fmt::Write as _;
use std::path::Path;

/// Render `results` as text: a `Domain:` header per domain (sorted), each
/// URL on its own tab-indented line, a blank line after every domain.
pub fn render_report(results: &AggregateResult) -> String {
    let mut domains: Vec<&String> = results.keys().collect();
    domains.sort();

    let mut out = String::new();
    for domain in domains {
        let _ = writeln!(out, "Domain: {domain}");
        for url in &results[domain] {
            let _ = writeln!(out, "\t{url}");
        }
        out.push('\n');
    }
    out
}

/// Write the report for `results` to `path`, replacing any previous file.
pub async fn write_report(path: &Path, results: &AggregateResult) -> Result<(), ReportError> {
    tokio::fs::write(path, render_report(results)).await?;
    Ok(())
}
