//! Request handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vgen_models::{get_preset, list_presets, CostTier, GenerateRequest};
use vgen_pipeline::GenerateResult;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct PresetSummary {
    pub name: String,
    pub channel_description: String,
    pub duration_minutes: u32,
    pub theme_count: usize,
}

pub async fn presets() -> ApiResult<Json<Vec<PresetSummary>>> {
    let summaries = list_presets()
        .into_iter()
        .map(|name| {
            let preset = get_preset(name).map_err(|e| ApiError::internal(e.to_string()))?;
            Ok(PresetSummary {
                name: preset.name.clone(),
                channel_description: preset.channel_description.clone(),
                duration_minutes: preset.duration_minutes,
                theme_count: preset.default_themes.len(),
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(summaries))
}

#[derive(Serialize)]
pub struct TierSummary {
    pub name: &'static str,
    pub model: &'static str,
    pub words_per_minute: u32,
    pub description: &'static str,
}

pub async fn tiers() -> Json<Vec<TierSummary>> {
    Json(
        CostTier::ALL
            .iter()
            .map(|tier| TierSummary {
                name: tier.as_str(),
                model: tier.script_model(),
                words_per_minute: tier.words_per_minute(),
                description: tier.description(),
            })
            .collect(),
    )
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResult>> {
    let result = state.generator.generate(&request).await?;
    Ok(Json(result))
}

pub async fn cache_stats(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let stats = state
        .generator
        .cache()
        .stats()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(serde_json::json!(stats)))
}

#[derive(Deserialize)]
pub struct ClearCacheParams {
    pub namespace: Option<String>,
}

#[derive(Serialize)]
pub struct ClearCacheResponse {
    pub removed: usize,
}

pub async fn clear_cache(
    State(state): State<AppState>,
    Query(params): Query<ClearCacheParams>,
) -> ApiResult<Json<ClearCacheResponse>> {
    let removed = state
        .generator
        .cache()
        .clear(params.namespace.as_deref())
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(ClearCacheResponse { removed }))
}
