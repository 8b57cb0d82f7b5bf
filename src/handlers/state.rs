//! Shared server state and the operations behind every endpoint
//!
//! The HTTP handlers and the Dioxus server functions are thin wrappers over
//! the methods here, so both surfaces answer identically.

use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::domain::models::{
    is_audio_file, DownloadKey, ModelCatalog, ModelRequest, OperationResponse, ServerStatus,
    TranscribeRequest, TranscribeResponse, WhisperModel,
};
use crate::infrastructure::{
    DownloadOutcome, DownloadRegistry, ModelDownloader, ModelStore, Transcriber, WhisperCli,
};
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{
    log_cancel_request, log_transcription_finished, log_transcription_rejected,
    log_transcription_start,
};

static STATE: OnceCell<Arc<AppState>> = OnceCell::new();

pub struct AppState {
    pub config: AppConfig,
    pub store: ModelStore,
    pub downloads: DownloadRegistry,
    downloader: ModelDownloader,
    transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let transcriber = Arc::new(WhisperCli::new(
            config.transcription.whisper_command.clone(),
            config.scratch_dir(),
        ));
        Self::with_transcriber(config, transcriber)
    }

    pub fn with_transcriber(config: AppConfig, transcriber: Arc<dyn Transcriber>) -> Result<Self> {
        let store = ModelStore::new(config.models_dir());
        store.ensure_layout()?;
        store.remove_partials()?;
        let downloader = ModelDownloader::new(&config.downloads)
            .map_err(|e| AppError::Startup(e.to_string()))?;

        Ok(Self {
            config,
            store,
            downloads: DownloadRegistry::new(),
            downloader,
            transcriber,
        })
    }

    /// Make the state reachable from server functions. Only the first call wins.
    pub fn install(state: Arc<AppState>) {
        if STATE.set(state).is_err() {
            tracing::warn!("Application state already installed, keeping the first one");
        }
    }

    pub fn global() -> anyhow::Result<Arc<AppState>> {
        STATE
            .get()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Application state is not initialized"))
    }

    pub fn catalog(&self) -> Result<ModelCatalog> {
        self.store.catalog()
    }

    /// Runs the whole transfer; returns once it completed, failed or was canceled
    pub async fn download(&self, request: &ModelRequest) -> OperationResponse {
        let key = match DownloadKey::parse(&request.feature, &request.model) {
            Ok(key) => key,
            Err(e) => return OperationResponse::failed(e.to_string()),
        };
        if let Err(e) = self.store.ensure_layout() {
            return OperationResponse::failed(e.to_string());
        }
        let handle = match self.downloads.begin(key) {
            Ok(handle) => handle,
            Err(e) => return OperationResponse::failed(e.to_string()),
        };

        let dest = self.store.model_path(key.model);
        match self.downloader.download(key.model, &dest, &handle).await {
            Ok(DownloadOutcome::Completed { .. }) => OperationResponse::ok(),
            Ok(DownloadOutcome::Canceled) => OperationResponse::canceled(),
            Err(e) => OperationResponse::failed(e.to_string()),
        }
    }

    pub fn cancel(&self, request: &ModelRequest) -> OperationResponse {
        let raw_key = request.raw_key();
        let cancelled = DownloadKey::parse(&request.feature, &request.model)
            .map(|key| self.downloads.cancel(&key))
            .unwrap_or(false);
        log_cancel_request(&raw_key, cancelled);

        if cancelled {
            OperationResponse::ok()
        } else {
            OperationResponse::failed(AppError::DownloadNotActive(raw_key).to_string())
        }
    }

    pub fn delete(&self, request: &ModelRequest) -> Result<OperationResponse> {
        let key = match DownloadKey::parse(&request.feature, &request.model) {
            Ok(key) => key,
            Err(e) => return Ok(OperationResponse::failed(e.to_string())),
        };
        self.store.delete(key.model)?;
        Ok(OperationResponse::ok())
    }

    /// Validation problems come back in-band; recognizer failures are errors
    pub async fn transcribe(&self, request: &TranscribeRequest) -> Result<TranscribeResponse> {
        let (audio, checkpoint, model) = match self.validate_transcription(request) {
            Ok(checked) => checked,
            Err(e) if e.is_validation() => {
                log_transcription_rejected(&request.filename, &e.to_string());
                return Ok(TranscribeResponse::failed(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        log_transcription_start(&audio, model.as_str());
        let started = Instant::now();
        let text = self.transcriber.transcribe(&audio, &checkpoint).await?;
        let elapsed = started.elapsed().as_secs_f64();
        log_transcription_finished(&audio, elapsed, text.len());

        Ok(TranscribeResponse::completed(text, elapsed))
    }

    fn validate_transcription(&self, request: &TranscribeRequest) -> Result<(PathBuf, PathBuf, WhisperModel)> {
        let audio = PathBuf::from(&request.filename);
        if !audio.is_file() {
            return Err(AppError::FileNotFound);
        }
        if !is_audio_file(&audio) {
            return Err(AppError::NotAudioFile(base_name(&audio)));
        }
        let model: WhisperModel = request.model.parse()?;
        if !self.store.is_downloaded(model) {
            return Err(AppError::ModelNotDownloaded(model.to_string()));
        }
        Ok((audio, self.store.model_path(model), model))
    }

    pub fn status(&self) -> Result<ServerStatus> {
        let catalog = self.store.catalog()?;
        Ok(ServerStatus {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: self.config.data_dir.display().to_string(),
            models_downloaded: catalog.downloaded().count(),
            models_available: catalog.models.values().map(Vec::len).sum(),
            bytes_on_disk: catalog.bytes_on_disk(),
            active_downloads: self.downloads.active(),
            transcriber_available: self.transcriber.is_available(),
        })
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::infrastructure::TranscribeError;
    use async_trait::async_trait;

    /// Echoes the audio file name back as the transcript
    pub struct FakeTranscriber;

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, audio: &Path, _checkpoint: &Path) -> std::result::Result<String, TranscribeError> {
            Ok(format!("transcript of {}", base_name(audio)))
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    pub fn state() -> (tempfile::TempDir, AppState) {
        state_with(|_| {})
    }

    /// The downloader reads its config at construction, so adjust it here
    pub fn state_with(configure: impl FnOnce(&mut AppConfig)) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::with_data_dir(dir.path());
        configure(&mut config);
        let state = AppState::with_transcriber(config, Arc::new(FakeTranscriber)).unwrap();
        (dir, state)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{state, state_with};
    use super::*;
    use crate::domain::models::Feature;

    #[test]
    fn test_cancel_inactive_uses_raw_key() {
        let (_dir, state) = state();
        let response = state.cancel(&ModelRequest::new("transcribe", "small"));
        assert_eq!(response.error.as_deref(), Some("Download transcribe_small is not active"));

        let response = state.cancel(&ModelRequest::new("bogus", "tiny"));
        assert_eq!(response.error.as_deref(), Some("Download bogus_tiny is not active"));
    }

    #[test]
    fn test_cancel_active_download() {
        let (_dir, state) = state();
        let key = DownloadKey::new(Feature::Transcribe, WhisperModel::Medium);
        let handle = state.downloads.begin(key).unwrap();

        let response = state.cancel(&ModelRequest::new("transcribe", "medium"));
        assert_eq!(response, OperationResponse::ok());
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_download_validation_order() {
        let (_dir, state) = state();
        let response = state.download(&ModelRequest::new("translate", "nope")).await;
        assert_eq!(response.error.as_deref(), Some("Invalid feature: translate"));

        let response = state.download(&ModelRequest::new("transcribe", "nope")).await;
        assert_eq!(response.error.as_deref(), Some("Invalid model: nope"));
    }

    #[tokio::test]
    async fn test_download_rejects_duplicate() {
        let (_dir, state) = state();
        let _running = state
            .downloads
            .begin(DownloadKey::new(Feature::Transcribe, WhisperModel::Small))
            .unwrap();

        let response = state.download(&ModelRequest::new("transcribe", "small")).await;
        assert_eq!(
            response.error.as_deref(),
            Some("Download transcribe_small is already active")
        );
    }

    #[tokio::test]
    async fn test_download_canceled_mid_transfer() {
        use crate::infrastructure::downloads::fetcher::test_support::{serve_slow, wait_for_file};
        use crate::infrastructure::downloads::partial_path;

        let url = serve_slow().await;
        let (_dir, state) = state_with(|config| {
            config.downloads.verify_checksums = false;
            config.downloads.urls.insert("small".to_string(), url);
        });
        let state = Arc::new(state);
        let dest = state.store.model_path(WhisperModel::Small);

        let running = state.clone();
        let transfer = tokio::spawn(async move {
            running.download(&ModelRequest::new("transcribe", "small")).await
        });

        wait_for_file(&partial_path(&dest)).await;
        let response = state.cancel(&ModelRequest::new("transcribe", "small"));
        assert_eq!(response, OperationResponse::ok());

        let response = transfer.await.unwrap();
        assert_eq!(response, OperationResponse::canceled());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"success": true, "canceled": true})
        );
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
        assert!(state.downloads.is_empty());
    }

    #[test]
    fn test_startup_removes_stale_partials() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_data_dir(dir.path());
        let store = ModelStore::new(config.models_dir());
        store.ensure_layout().unwrap();
        let stale = store.whisper_dir().join("large.pt.part");
        std::fs::write(&stale, b"left by a crash").unwrap();

        let _state = AppState::with_transcriber(config, Arc::new(test_support::FakeTranscriber)).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_delete() {
        let (_dir, state) = state();
        std::fs::write(state.store.model_path(WhisperModel::Small), b"weights").unwrap();

        let response = state.delete(&ModelRequest::new("transcribe", "small")).unwrap();
        assert!(response.success);
        assert!(!state.store.is_downloaded(WhisperModel::Small));

        // Already gone is still a success
        let response = state.delete(&ModelRequest::new("transcribe", "small")).unwrap();
        assert!(response.success);

        let response = state.delete(&ModelRequest::new("transcribe", "huge")).unwrap();
        assert_eq!(response.error.as_deref(), Some("Invalid model: huge"));
    }

    #[tokio::test]
    async fn test_transcribe_validation() {
        let (dir, state) = state();
        let missing = dir.path().join("missing.wav");
        let response = state
            .transcribe(&TranscribeRequest::new(missing.to_string_lossy(), "small"))
            .await
            .unwrap();
        assert_eq!(response.error.as_deref(), Some("File does not exist"));

        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"text").unwrap();
        let response = state
            .transcribe(&TranscribeRequest::new(notes.to_string_lossy(), "small"))
            .await
            .unwrap();
        assert_eq!(response.error.as_deref(), Some("notes.txt is not an audio file"));

        let audio = dir.path().join("talk.WAV");
        std::fs::write(&audio, b"RIFF").unwrap();
        let response = state
            .transcribe(&TranscribeRequest::new(audio.to_string_lossy(), "tiny"))
            .await
            .unwrap();
        assert_eq!(response.error.as_deref(), Some("Invalid model: tiny"));

        let response = state
            .transcribe(&TranscribeRequest::new(audio.to_string_lossy(), "small"))
            .await
            .unwrap();
        assert_eq!(
            response.error.as_deref(),
            Some("You must download the model \"small\" before you can use it")
        );
    }

    #[tokio::test]
    async fn test_transcribe_success() {
        let (dir, state) = state();
        std::fs::write(state.store.model_path(WhisperModel::Small), b"weights").unwrap();
        let audio = dir.path().join("talk.mp3");
        std::fs::write(&audio, b"ID3").unwrap();

        let response = state
            .transcribe(&TranscribeRequest::new(audio.to_string_lossy(), "small"))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.result.as_deref(), Some("transcript of talk.mp3"));
        assert!(response.time_elapsed.unwrap() >= 0.0);
    }

    #[test]
    fn test_status() {
        let (_dir, state) = state();
        std::fs::write(state.store.model_path(WhisperModel::Large), vec![0u8; 10]).unwrap();

        let status = state.status().unwrap();
        assert_eq!(status.models_available, 3);
        assert_eq!(status.models_downloaded, 1);
        assert_eq!(status.bytes_on_disk, 10);
        assert!(status.active_downloads.is_empty());
        assert!(status.transcriber_available);
    }
}
