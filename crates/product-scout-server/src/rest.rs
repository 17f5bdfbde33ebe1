// Copyright 2026 Product Scout Contributors
// SPDX-License-Identifier: MIT

//! HTTP REST API for Product Scout.
//!
//! `POST /api/discover` runs one crawl over the submitted domains and answers
//! with every product URL found, keyed by domain. `GET /health` is a liveness
//! probe.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use product_scout::error::FetchResult;
use product_scout::report::write_report;
use product_scout::{AggregateResult, Coordinator, ProductUrls, ScoutConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

const ERROR_MESSAGE: &str = "An error occurred while processing the request";

/// State shared by every request.
pub struct AppState {
    coordinator: Coordinator,
    report_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(coordinator: Coordinator, report_path: Option<PathBuf>) -> Self {
        Self {
            coordinator,
            report_path,
        }
    }

    pub fn from_config(config: &ScoutConfig) -> FetchResult<Self> {
        Ok(Self::new(
            Coordinator::from_config(config)?,
            config.report_path.clone(),
        ))
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }
}

/// Body of `POST /api/discover`. A missing or null `urls` is an empty batch.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub product_urls: BTreeMap<String, ProductUrls>,
}

impl From<AggregateResult> for DiscoverResponse {
    fn from(results: AggregateResult) -> Self {
        Self {
            product_urls: results.into_iter().collect(),
        }
    }
}

/// Any request the API could not process. Always answered with a 400.
#[derive(Debug)]
pub struct ApiError(String);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": ERROR_MESSAGE,
            "error": self.0,
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Build the axum Router with all REST endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/discover", post(discover))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `addr` until the process exits.
pub async fn start(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    info!("REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn discover(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Option<DiscoverRequest>>, JsonRejection>,
) -> Result<Json<DiscoverResponse>, ApiError> {
    let Json(request) = payload?;
    let domains = request.and_then(|r| r.urls).unwrap_or_default();

    let results = state.coordinator.crawl(&domains).await;

    if let Some(path) = &state.report_path {
        if let Err(e) = write_report(path, &results).await {
            warn!("failed to write report to {}: {e}", path.display());
        }
    }

    Ok(Json(DiscoverResponse::from(results)))
}
