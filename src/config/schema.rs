//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::models::WhisperModel;

/// Port the desktop shell expects the backend on
pub const DEFAULT_PORT: u16 = 52014;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address of the standalone API server.
    pub bind: SocketAddr,

    /// Root of models and scratch space.
    pub data_dir: PathBuf,

    /// Browser origins starting with this prefix may call the API.
    pub allowed_origin_prefix: String,

    pub downloads: DownloadsConfig,

    pub transcription: TranscriptionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            data_dir: default_data_dir(),
            allowed_origin_prefix: "http://127.0.0.1:".to_string(),
            downloads: DownloadsConfig::default(),
            transcription: TranscriptionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Configuration rooted at `data_dir`, everything else default
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        self.data_dir.join("models")
    }

    /// Working directory for recognizer output
    pub fn scratch_dir(&self) -> PathBuf {
        self.data_dir.join("scratch")
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }
}

/// `<user config dir>/neuronbox`
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("neuronbox")
}

/// Model download settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadsConfig {
    pub connect_timeout_secs: u64,

    /// How often the progress stream emits the current percentage.
    pub progress_interval_ms: u64,

    /// How long a progress stream waits for its download to start.
    pub idle_timeout_secs: u64,

    /// Compare the SHA-256 of each downloaded checkpoint with the published one.
    pub verify_checksums: bool,

    /// Mirror URLs keyed by model name (`small`, `medium`, `large`).
    pub urls: BTreeMap<String, String>,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            progress_interval_ms: 1000,
            idle_timeout_secs: 30,
            verify_checksums: true,
            urls: BTreeMap::new(),
        }
    }
}

impl DownloadsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Mirror if configured, official URL otherwise
    pub fn url_for(&self, model: WhisperModel) -> String {
        self.urls
            .get(model.as_str())
            .cloned()
            .unwrap_or_else(|| model.download_url().to_string())
    }
}

/// External recognizer settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Executable name or path of the whisper command line tool.
    pub whisper_command: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            whisper_command: "whisper".to_string(),
        }
    }
}
