//! Axum HTTP API server.
//!
//! This crate provides:
//! - Generation, preset, and tier endpoints
//! - Cache inspection and clearing
//! - Optional API key auth, per-IP rate limiting, request IDs

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
