use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::shared::errors::AppError;

/// Unexpected failure: logged, then reported as `500` with the message as body
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}
