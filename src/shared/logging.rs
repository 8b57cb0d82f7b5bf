//! Structured logging module for NeuronBox
//!
//! Provides consistent, contextual logging across the server.
//! Every event carries an `operation` field so logs can be filtered per flow.

use std::path::Path;

use crate::domain::models::DownloadKey;

#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    ModelCatalog,
    ModelDownload,
    DownloadCancel,
    ModelDelete,
    Transcription,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::ModelCatalog => "model_catalog",
            LogOperation::ModelDownload => "model_download",
            LogOperation::DownloadCancel => "download_cancel",
            LogOperation::ModelDelete => "model_delete",
            LogOperation::Transcription => "transcription",
        }
    }
}

/// Install the global subscriber (`RUST_LOG` overrides, `info` by default)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

pub fn log_catalog_listed(models_dir: &Path, downloaded: usize) {
    tracing::debug!(
        operation = LogOperation::ModelCatalog.as_str(),
        models_dir = %models_dir.display(),
        downloaded = downloaded,
        "Model catalog listed"
    );
}

pub fn log_download_start(key: &DownloadKey, url: &str, destination: &Path) {
    tracing::info!(
        operation = LogOperation::ModelDownload.as_str(),
        key = %key,
        url = url,
        destination = %destination.display(),
        "Starting download"
    );
}

pub fn log_download_complete(key: &DownloadKey, bytes: u64) {
    tracing::info!(
        operation = LogOperation::ModelDownload.as_str(),
        key = %key,
        bytes = bytes,
        "Download completed"
    );
}

pub fn log_download_canceled(key: &DownloadKey, bytes_written: u64) {
    tracing::info!(
        operation = LogOperation::ModelDownload.as_str(),
        key = %key,
        bytes_written = bytes_written,
        "Canceled download detected, deleting partial model"
    );
}

pub fn log_download_failed(key: &DownloadKey, error: &str) {
    tracing::error!(
        operation = LogOperation::ModelDownload.as_str(),
        key = %key,
        error = error,
        "Download failed"
    );
}

pub fn log_cancel_request(key: &str, was_active: bool) {
    if was_active {
        tracing::info!(
            operation = LogOperation::DownloadCancel.as_str(),
            key = key,
            "Cancel requested"
        );
    } else {
        tracing::warn!(
            operation = LogOperation::DownloadCancel.as_str(),
            key = key,
            "Cancel requested for a download that is not active"
        );
    }
}

pub fn log_model_deleted(path: &Path, existed: bool) {
    tracing::info!(
        operation = LogOperation::ModelDelete.as_str(),
        path = %path.display(),
        existed = existed,
        "Deleted model"
    );
}

pub fn log_transcription_start(file: &Path, model: &str) {
    tracing::info!(
        operation = LogOperation::Transcription.as_str(),
        file = %file.display(),
        model = model,
        "Transcribing"
    );
}

pub fn log_transcription_finished(file: &Path, elapsed_secs: f64, chars: usize) {
    tracing::info!(
        operation = LogOperation::Transcription.as_str(),
        file = %file.display(),
        elapsed_secs = elapsed_secs,
        chars = chars,
        "Transcription finished"
    );
}

pub fn log_transcription_rejected(file: &str, reason: &str) {
    tracing::debug!(
        operation = LogOperation::Transcription.as_str(),
        file = file,
        reason = reason,
        "Transcription request rejected"
    );
}
