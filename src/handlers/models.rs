//! Model catalog and lifecycle endpoints

use axum::{Extension, Json};
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::models::{ModelCatalog, ModelRequest, OperationResponse};

/// GET /api/models
pub async fn list_models_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ModelCatalog>, ApiError> {
    Ok(Json(state.catalog()?))
}

/// POST /api/models/download
/// Holds the request open until the transfer ends; progress is on the SSE route.
pub async fn download_model_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<ModelRequest>,
) -> Json<OperationResponse> {
    Json(state.download(&request).await)
}

/// POST /api/models/cancel-download
pub async fn cancel_download_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<ModelRequest>,
) -> Json<OperationResponse> {
    Json(state.cancel(&request))
}

/// POST /api/models/delete
pub async fn delete_model_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<ModelRequest>,
) -> Result<Json<OperationResponse>, ApiError> {
    Ok(Json(state.delete(&request)?))
}
