// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Pull hyperlinks out of raw HTML.

use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

fn anchor_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("a[href]").expect("anchor selector is valid"))
}

fn base_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("base[href]").expect("base selector is valid"))
}

/// Every `<a href>` in `html`, resolved to an absolute URL against `base_url`.
///
/// Pass the URL the document was actually served from (after redirects).
/// A `<base href>` in the document takes precedence, the same way a browser
/// resolves `a.href`. Hrefs that cannot be resolved are dropped; everything
/// else is kept in document order, duplicates included.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let page = Url::parse(base_url).ok();
    let base = document_base(&document, page.as_ref()).or(page);

    document
        .select(anchor_selector())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve(base.as_ref(), href.trim()))
        .collect()
}

/// The first `<base href>`, resolved against the page URL.
fn document_base(document: &Html, page: Option<&Url>) -> Option<Url> {
    let href = document
        .select(base_selector())
        .next()?
        .value()
        .attr("href")?
        .trim();
    match page {
        Some(page) => page.join(href).ok(),
        None => Url::parse(href).ok(),
    }
}

fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(|u| u.to_string()),
        None => Url::parse(href).ok().map(|u| u.to_string()),
    }
}
