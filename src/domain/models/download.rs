use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::{Feature, WhisperModel};
use crate::shared::errors::AppError;

/// Identifies one model download, displayed as `<feature>_<model>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DownloadKey {
    pub feature: Feature,
    pub model: WhisperModel,
}

impl DownloadKey {
    pub fn new(feature: Feature, model: WhisperModel) -> Self {
        Self { feature, model }
    }

    /// Parse raw request values; the feature is checked before the model
    pub fn parse(feature: &str, model: &str) -> Result<Self, AppError> {
        let feature = feature.parse::<Feature>()?;
        let model = model.parse::<WhisperModel>()?;
        Ok(Self { feature, model })
    }
}

impl fmt::Display for DownloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.feature, self.model)
    }
}

/// Body of the download, cancel and delete requests.
/// Missing fields deserialize as empty strings so they fail validation in-band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    #[serde(default)]
    pub feature: String,
    #[serde(default)]
    pub model: String,
}

impl ModelRequest {
    pub fn new(feature: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            model: model.into(),
        }
    }

    /// Key used in messages even when the values do not parse
    pub fn raw_key(&self) -> String {
        format!("{}_{}", self.feature, self.model)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// `{"success": bool, "error"?: string, "canceled"?: true}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub canceled: bool,
}

impl OperationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            canceled: false,
        }
    }

    /// A cancelled download still reports success, as the client asked for it
    pub fn canceled() -> Self {
        Self {
            success: true,
            error: None,
            canceled: true,
        }
    }
}

/// Snapshot of one active download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadStatus {
    pub key: String,
    pub feature: Feature,
    pub model: WhisperModel,
    /// Percentage in `[0, 100]`
    pub progress: f64,
    pub cancel_requested: bool,
    pub started_at: DateTime<Utc>,
}
