use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::AppError;

/// Feature a model belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Transcribe,
}

impl Feature {
    pub const ALL: [Feature; 1] = [Feature::Transcribe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Transcribe => "transcribe",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| AppError::InvalidFeature(s.to_string()))
    }
}

/// Whisper checkpoints offered for download
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhisperModel {
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    pub const ALL: [WhisperModel; 3] = [WhisperModel::Small, WhisperModel::Medium, WhisperModel::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WhisperModel::Small => "Small, requires ~2GB RAM",
            WhisperModel::Medium => "Medium, requires ~5GB RAM",
            WhisperModel::Large => "Large, requires ~10GB RAM",
        }
    }

    /// Checkpoint file name inside the whisper models directory
    pub fn file_name(&self) -> String {
        format!("{}.pt", self.as_str())
    }

    /// Official checkpoint URL. `large` points at large-v2.
    pub fn download_url(&self) -> &'static str {
        match self {
            WhisperModel::Small => {
                "https://openaipublic.azureedge.net/main/whisper/models/9ecf779972d90ba49c06d968637d720dd632c55bbf19d441fb42bf17a411e794/small.pt"
            }
            WhisperModel::Medium => {
                "https://openaipublic.azureedge.net/main/whisper/models/345ae4da62f9b3d59415adc60127b97c714f32e89e936602e85993674d08dcb1/medium.pt"
            }
            WhisperModel::Large => {
                "https://openaipublic.azureedge.net/main/whisper/models/81f7c96c852ee8fc832187b0132e569d6c3065a3252ed18e56effd0b6a73e524/large-v2.pt"
            }
        }
    }

    /// Expected SHA-256 of the checkpoint (the hash segment of the URL)
    pub fn sha256(&self) -> &'static str {
        self.download_url()
            .rsplit('/')
            .nth(1)
            .unwrap_or_default()
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WhisperModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WhisperModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| AppError::InvalidModel(s.to_string()))
    }
}

/// Catalog entry as returned by the models endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub description: String,
    pub downloaded: bool,
    /// Size on disk in bytes, 0 when not downloaded
    pub size: u64,
}

impl ModelInfo {
    pub fn not_downloaded(model: WhisperModel) -> Self {
        Self {
            name: model.as_str().to_string(),
            description: model.description().to_string(),
            downloaded: false,
            size: 0,
        }
    }
}

/// `{"models": {"transcribe": [...]}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub models: BTreeMap<Feature, Vec<ModelInfo>>,
}

impl ModelCatalog {
    pub fn for_feature(&self, feature: Feature) -> &[ModelInfo] {
        self.models.get(&feature).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn downloaded(&self) -> impl Iterator<Item = &ModelInfo> {
        self.models.values().flatten().filter(|model| model.downloaded)
    }

    pub fn bytes_on_disk(&self) -> u64 {
        self.downloaded().map(|model| model.size).sum()
    }
}
