//! HTTP API served next to the Dioxus app (and by the standalone server)

/// Shared state and the service operations behind each endpoint
pub mod state;

pub mod error;
pub mod health;

/// Catalog, download, cancel and delete
pub mod models;

/// SSE download progress
pub mod progress;

pub mod status;
pub mod transcribe;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
        HeaderValue, Method,
    },
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use error::ApiError;
pub use health::health_handler;
pub use models::{cancel_download_handler, delete_model_handler, download_model_handler, list_models_handler};
pub use progress::{download_progress_handler, watch_progress, ProgressUpdate};
pub use state::AppState;
pub use status::status_handler;
pub use transcribe::transcribe_handler;

/// Every API route with CORS, request tracing and the state attached
pub fn api_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.allowed_origin_prefix.clone());

    // NOTE: Axum 0.8 uses {param} syntax instead of :param
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/status", get(status_handler))
        .route("/api/models", get(list_models_handler))
        .route("/api/models/download", post(download_model_handler))
        .route("/api/models/cancel-download", post(cancel_download_handler))
        .route("/api/models/delete", post(delete_model_handler))
        .route("/api/download-progress/{feature}/{model}", get(download_progress_handler))
        .route("/api/transcribe", post(transcribe_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Only local front ends may call the API
fn cors_layer(origin_prefix: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request: &Parts| {
                origin
                    .to_str()
                    .map(|origin| origin.starts_with(&origin_prefix))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::WhisperModel;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    fn app() -> (tempfile::TempDir, Arc<AppState>, Router) {
        let (dir, mut state) = state::test_support::state();
        state.config.downloads.idle_timeout_secs = 0;
        state.config.downloads.progress_interval_ms = 10;
        let state = Arc::new(state);
        let router = api_router(state.clone());
        (dir, state, router)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, _state, app) = app();
        let response = app.oneshot(get("/api/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_models_catalog() {
        let (_dir, state, app) = app();
        std::fs::write(state.store.model_path(WhisperModel::Medium), vec![1u8; 7]).unwrap();

        let response = app.oneshot(get("/api/models")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let models = json["models"]["transcribe"].as_array().unwrap();
        assert_eq!(models.len(), 3);
        assert_eq!(models[1]["name"], "medium");
        assert_eq!(models[1]["downloaded"], true);
        assert_eq!(models[1]["size"], 7);
    }

    #[tokio::test]
    async fn test_download_invalid_feature_is_in_band() {
        let (_dir, _state, app) = app();
        let response = app
            .oneshot(post_json(
                "/api/models/download",
                serde_json::json!({"feature": "translate", "model": "small"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"success": false, "error": "Invalid feature: translate"}));
    }

    #[tokio::test]
    async fn test_cancel_inactive_download() {
        let (_dir, _state, app) = app();
        let response = app
            .oneshot(post_json(
                "/api/models/cancel-download",
                serde_json::json!({"feature": "transcribe", "model": "large"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Download transcribe_large is not active");
    }

    #[tokio::test]
    async fn test_delete_model() {
        let (_dir, state, app) = app();
        std::fs::write(state.store.model_path(WhisperModel::Small), b"weights").unwrap();

        let response = app
            .oneshot(post_json(
                "/api/models/delete",
                serde_json::json!({"feature": "transcribe", "model": "small"}),
            ))
            .await
            .unwrap();

        assert_eq!(body_json(response).await, serde_json::json!({"success": true}));
        assert!(!state.store.is_downloaded(WhisperModel::Small));
    }

    #[tokio::test]
    async fn test_transcribe_missing_file() {
        let (dir, _state, app) = app();
        let missing = dir.path().join("nothing.wav");
        let response = app
            .oneshot(post_json(
                "/api/transcribe",
                serde_json::json!({"filename": missing, "model": "small"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"success": false, "error": "File does not exist"}));
    }

    #[tokio::test]
    async fn test_status() {
        let (_dir, _state, app) = app();
        let response = app.oneshot(get("/api/status")).await.unwrap();

        let json = body_json(response).await;
        assert_eq!(json["models_available"], 3);
        assert_eq!(json["models_downloaded"], 0);
        assert_eq!(json["active_downloads"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_progress_stream_ends_with_done() {
        let (_dir, _state, app) = app();
        let response = app
            .oneshot(get("/api/download-progress/transcribe/small"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/event-stream");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("event: done"), "unexpected body: {body}");
    }

    #[tokio::test]
    async fn test_cors_allows_local_origin_only() {
        let (_dir, _state, app) = app();
        let preflight = |origin: &str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/models/download")
                .header("origin", origin)
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(preflight("http://127.0.0.1:5173")).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://127.0.0.1:5173"
        );

        let response = app.oneshot(preflight("https://example.com")).await.unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }
}
