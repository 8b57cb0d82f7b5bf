//! Server functions for Dioxus Fullstack
//! These run on the server against the shared `AppState` and are callable from the pages.

use dioxus::prelude::*;

use crate::domain::models::{ModelCatalog, OperationResponse, ServerStatus, TranscribeResponse};

/// Model catalog with download state
#[server]
pub async fn get_model_catalog() -> Result<ModelCatalog, ServerFnError> {
    use crate::handlers::AppState;

    let state = AppState::global().map_err(|e| ServerFnError::new(e.to_string()))?;
    state.catalog().map_err(|e| ServerFnError::new(e.to_string()))
}

/// Runs until the download completes, fails or is canceled.
/// Progress is streamed separately on `/api/download-progress/{feature}/{model}`.
#[server]
pub async fn download_model(feature: String, model: String) -> Result<OperationResponse, ServerFnError> {
    use crate::domain::models::ModelRequest;
    use crate::handlers::AppState;

    let state = AppState::global().map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(state.download(&ModelRequest::new(feature, model)).await)
}

#[server]
pub async fn cancel_download(feature: String, model: String) -> Result<OperationResponse, ServerFnError> {
    use crate::domain::models::ModelRequest;
    use crate::handlers::AppState;

    let state = AppState::global().map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(state.cancel(&ModelRequest::new(feature, model)))
}

#[server]
pub async fn delete_model(feature: String, model: String) -> Result<OperationResponse, ServerFnError> {
    use crate::domain::models::ModelRequest;
    use crate::handlers::AppState;

    let state = AppState::global().map_err(|e| ServerFnError::new(e.to_string()))?;
    state
        .delete(&ModelRequest::new(feature, model))
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Validation failures come back as `success: false`; recognizer failures as errors
#[server]
pub async fn transcribe_file(filename: String, model: String) -> Result<TranscribeResponse, ServerFnError> {
    use crate::domain::models::TranscribeRequest;
    use crate::handlers::AppState;

    let state = AppState::global().map_err(|e| ServerFnError::new(e.to_string()))?;
    tracing::info!("transcribe_file called for {} with model {}", filename, model);
    state
        .transcribe(&TranscribeRequest::new(filename, model))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server]
pub async fn get_server_status() -> Result<ServerStatus, ServerFnError> {
    use crate::handlers::AppState;

    let state = AppState::global().map_err(|e| ServerFnError::new(e.to_string()))?;
    state.status().map_err(|e| ServerFnError::new(e.to_string()))
}
