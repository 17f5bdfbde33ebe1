// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Result shapes shared by every layer.

use std::collections::{BTreeSet, HashMap};

/// Product URLs found for one domain.
///
/// Uniqueness is by exact string: no trailing-slash, query or case
/// normalisation is applied.
pub type ProductUrls = BTreeSet<String>;

/// One entry per submitted domain, keyed by the domain string exactly as the
/// caller passed it.
pub type AggregateResult = HashMap<String, ProductUrls>;
