use axum::{Extension, Json};
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::models::ServerStatus;

/// GET /api/status
pub async fn status_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ServerStatus>, ApiError> {
    Ok(Json(state.status()?))
}
