// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Product-page URL classification.
//!
//! A URL names a product detail page when it contains one of the path
//! shapes that storefronts conventionally use for them (`/product/`,
//! `/dp/`, `/item-`, ...).
//!
//! **The whole URL string is matched, scheme through fragment, not just the
//! path.** Pass fully-qualified absolute URLs: a relative `p/123` has no
//! leading slash and will not match, while any matching substring elsewhere
//! in the string (including the host part) will.

use regex::RegexSet;
use std::sync::OnceLock;

/// Path shapes that mark a product detail page, in evaluation order.
///
/// Every entry is a plain substring, `/listing/` included. Anchoring
/// `/listing/` to the start of the string would make it unreachable for
/// absolute URLs, so it deliberately matches anywhere like the rest.
pub const PRODUCT_PATTERNS: &[&str] = &[
    "/product/",
    "/item/",
    "/p/",
    "/ip/",
    "/t/",
    "/pd/",
    "/catalog/",
    "/goods/",
    "/good/",
    "/detail/",
    "/dp/",
    "/buy/",
    "/prod-",
    "/item-",
    "/itm/",
    "/productdetails/",
    "/proddetail/",
    "/listing/",
];

fn pattern_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new(PRODUCT_PATTERNS.iter().map(|p| regex::escape(p)))
            .expect("product patterns are valid")
    })
}

/// Returns true when `url` looks like a product detail page.
///
/// Empty input is never a product URL. The check is a pure function of the
/// string.
pub fn is_product_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    pattern_set().is_match(url)
}

/// [`is_product_url`] for values that may be absent, such as an anchor
/// without an `href`.
pub fn is_product_url_opt(url: Option<&str>) -> bool {
    url.is_some_and(is_product_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_urls_match() {
        assert!(is_product_url("https://example.com/product/123"));
        assert!(is_product_url("https://shop.com/item/456"));
        assert!(is_product_url("https://store.com/p/789"));
        assert!(is_product_url("https://www.amazon.com/Widget/dp/B000123"));
        assert!(is_product_url("https://www.walmart.com/ip/Thing/55"));
        assert!(is_product_url("https://www.ebay.com/itm/1234"));
        assert!(is_product_url("https://shop.test/prod-blue-shirt"));
        assert!(is_product_url("https://shop.test/item-778"));
        assert!(is_product_url("https://shop.test/listing/991/vintage-lamp"));
    }

    #[test]
    fn test_non_product_urls_rejected() {
        assert!(!is_product_url("https://example.com/category/electronics"));
        assert!(!is_product_url("https://shop.com/about-us"));
        assert!(!is_product_url("https://store.com/contact"));
        assert!(!is_product_url("https://store.com/products"));
        assert!(!is_product_url("https://store.com/"));
    }

    #[test]
    fn test_empty_and_missing() {
        assert!(!is_product_url(""));
        assert!(!is_product_url_opt(None));
        assert!(!is_product_url_opt(Some("")));
        assert!(is_product_url_opt(Some("https://example.com/product/1")));
    }

    #[test]
    fn test_relative_url_without_leading_slash_is_rejected() {
        assert!(!is_product_url("product/123"));
        assert!(is_product_url("/product/123"));
    }

    #[test]
    fn test_matching_is_case_sensitive_and_exact() {
        assert!(!is_product_url("https://example.com/PRODUCT/123"));
        assert!(is_product_url("https://example.com/product/123?ref=home#top"));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let urls = [
            "https://example.com/product/123",
            "https://example.com/contact",
            "",
        ];
        for url in urls {
            let first = is_product_url(url);
            for _ in 0..5 {
                assert_eq!(is_product_url(url), first);
            }
        }
    }

    #[test]
    fn test_every_pattern_matches_itself() {
        for pattern in PRODUCT_PATTERNS {
            let url = format!("https://example.com{pattern}x");
            assert!(is_product_url(&url), "{url} should match");
        }
    }
}
