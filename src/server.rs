//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::PngCodec;
use crate::services::{PreviewCache, PreviewService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub preview: Arc<PreviewService>,
    pub cache: Arc<PreviewCache>,
}

impl AppState {
    /// Build state from an already loaded configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let cache = Arc::new(PreviewCache::new(config.cache.capacity));
        let codec = PngCodec::new(config.limits.max_pixels, config.output.optimize);
        let preview = Arc::new(PreviewService::new(codec, cache.clone()));

        Self {
            config: Arc::new(config),
            preview,
            cache,
        }
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    if config.limits.max_upload_bytes == 0 {
        anyhow::bail!("limits.max_upload_bytes must be greater than zero");
    }
    Ok(AppState::from_config(config))
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.limits.max_upload_bytes;

    Router::new()
        .route("/api/filters", get(handle_filters))
        .route("/api/preview", post(handle_preview))
        .route("/api/magnifier", post(handle_magnifier))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state, upload limit and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_filters(State(state): State<AppState>) -> Json<api::FiltersResponse> {
    api::handle_filters(State(state.config)).await
}

async fn handle_preview(
    State(state): State<AppState>,
    query: Query<api::PreviewQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    api::handle_preview(State(state.preview), State(state.config), query, body).await
}

async fn handle_magnifier(
    State(state): State<AppState>,
    request: axum::Json<api::MagnifierRequest>,
) -> Json<api::MagnifierResponse> {
    api::handle_magnifier(State(state.config), request).await
}
