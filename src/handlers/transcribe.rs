use axum::{Extension, Json};
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::models::{TranscribeRequest, TranscribeResponse};

/// POST /api/transcribe
pub async fn transcribe_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    Ok(Json(state.transcribe(&request).await?))
}
