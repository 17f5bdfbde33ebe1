// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! Product Scout server: REST API and command line front end.

pub mod rest;

pub use rest::{router, start, AppState, DiscoverRequest, DiscoverResponse};
