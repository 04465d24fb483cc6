//! HTTP-level tests against the full router.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use vgen_api::{create_router, ApiConfig, AppState};
use vgen_pipeline::{ContentGenerator, PipelineConfig};

fn app(cache_dir: &std::path::Path, api_key: Option<&str>) -> Router {
    let pipeline_config = PipelineConfig {
        cache_dir: cache_dir.to_path_buf(),
        ..PipelineConfig::default()
    };
    let config = ApiConfig {
        api_key: api_key.map(String::from),
        ..ApiConfig::default()
    };
    let state = AppState::with_generator(config, ContentGenerator::from_config(&pipeline_config));
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_open() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path(), None)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn presets_lists_both_niches() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path(), None)
        .oneshot(Request::get("/presets").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["finance_ai_saas", "devotional"]);
}

#[tokio::test]
async fn tiers_reports_models() {
    let dir = tempfile::tempdir().unwrap();
    let response = app(dir.path(), None)
        .oneshot(Request::get("/tiers").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["name"], "free");
    assert_eq!(json[0]["model"], "gpt-3.5-turbo");
}

#[tokio::test]
async fn dry_run_generate_succeeds_without_providers() {
    let dir = tempfile::tempdir().unwrap();
    let body = serde_json::json!({
        "preset": "devotional",
        "dry_run": true
    });
    let response = app(dir.path(), None)
        .oneshot(
            Request::post("/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["estimate"]["total_estimated_api_calls"], 3);
    assert_eq!(json["shorts_estimate"]["api_calls_required"], 0);
}

#[tokio::test]
async fn unknown_preset_is_a_client_error() {
    let dir = tempfile::tempdir().unwrap();
    let body = serde_json::json!({ "preset": "nope", "dry_run": true });
    let response = app(dir.path(), None)
        .oneshot(
            Request::post("/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn out_of_range_shorts_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let body = serde_json::json!({
        "preset": "devotional",
        "shorts_count": 20,
        "dry_run": true
    });
    let response = app(dir.path(), None)
        .oneshot(
            Request::post("/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn api_key_required_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), Some("secret"));

    let denied = app
        .clone()
        .oneshot(Request::get("/presets").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let allowed = app
        .clone()
        .oneshot(
            Request::get("/presets")
                .header("X-API-Key", "secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);

    // Health stays open for probes
    let health = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn cache_endpoints_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path(), None);

    let stats = app
        .clone()
        .oneshot(Request::get("/cache/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(stats.status(), StatusCode::OK);
    let json = body_json(stats).await;
    assert_eq!(json["total_entries"], 0);

    let cleared = app
        .oneshot(
            Request::delete("/cache?namespace=scripts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::OK);
    let json = body_json(cleared).await;
    assert_eq!(json["removed"], 0);
}
