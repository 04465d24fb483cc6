//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{cache_stats, clear_cache, generate, health, presets, tiers};
use crate::middleware::{
    api_key_auth, cors_layer, rate_limit_middleware, request_id, request_logging,
    RateLimiterCache,
};
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let api_routes = Router::new()
        .route("/generate", post(generate))
        .route("/presets", get(presets))
        .route("/tiers", get(tiers))
        .route("/cache/stats", get(cache_stats))
        .route("/cache", delete(clear_cache))
        .layer(middleware::from_fn_with_state(state.clone(), api_key_auth))
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_logging))
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
