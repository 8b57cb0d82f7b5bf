//! Streams a checkpoint to disk while reporting progress to the registry

use futures::StreamExt;
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use super::registry::DownloadHandle;
use crate::config::DownloadsConfig;
use crate::domain::models::WhisperModel;
use crate::shared::logging::{
    log_download_canceled, log_download_complete, log_download_failed, log_download_start,
};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to establish a connection. Please check your internet connection.")]
    Connection,

    #[error("The request timed out. Please try again later.")]
    Timeout,

    #[error("An error occurred while downloading: {0}")]
    Request(String),

    #[error("Downloaded data size does not match expected size")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("Downloaded model failed checksum verification")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Could not build HTTP client: {0}")]
    Client(String),

    #[error("An error occurred while downloading: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DownloadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            DownloadError::Connection
        } else if e.is_timeout() {
            DownloadError::Timeout
        } else {
            DownloadError::Request(e.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed { bytes: u64 },
    Canceled,
}

#[derive(Clone)]
pub struct ModelDownloader {
    client: reqwest::Client,
    config: DownloadsConfig,
}

impl ModelDownloader {
    pub fn new(config: &DownloadsConfig) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| DownloadError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Download `model` into `dest`.
    ///
    /// Bytes go to `<dest>.part` and are renamed into place only once the
    /// transfer finished and passed verification. Any other exit removes
    /// the partial file, including the future being dropped mid-transfer.
    pub async fn download(
        &self,
        model: WhisperModel,
        dest: &Path,
        handle: &DownloadHandle,
    ) -> Result<DownloadOutcome, DownloadError> {
        let key = handle.key();
        let url = self.config.url_for(model);
        let partial = PartialFile::new(partial_path(dest));
        log_download_start(&key, &url, dest);

        let result = self.fetch(&url, partial.path(), model, handle).await;
        match result {
            Ok(Some(bytes)) => {
                fs::rename(partial.path(), dest).await?;
                partial.keep();
                handle.set_progress(100.0);
                log_download_complete(&key, bytes);
                Ok(DownloadOutcome::Completed { bytes })
            }
            Ok(None) => Ok(DownloadOutcome::Canceled),
            Err(e) => {
                log_download_failed(&key, &e.to_string());
                Err(e)
            }
        }
    }

    /// Returns the byte count, or `None` when the download was canceled
    async fn fetch(
        &self,
        url: &str,
        partial: &Path,
        model: WhisperModel,
        handle: &DownloadHandle,
    ) -> Result<Option<u64>, DownloadError> {
        if handle.is_cancelled() {
            log_download_canceled(&handle.key(), 0);
            return Ok(None);
        }

        let response = self.client.get(url).send().await?.error_for_status()?;
        let total = response.content_length();

        let mut file = File::create(partial).await?;
        let mut hasher = Sha256::new();
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if handle.is_cancelled() {
                log_download_canceled(&handle.key(), written);
                return Ok(None);
            }

            file.write_all(&chunk).await?;
            hasher.update(&chunk);
            written += chunk.len() as u64;

            if let Some(total) = total.filter(|t| *t > 0) {
                handle.set_progress(written as f64 / total as f64 * 100.0);
            }
        }
        file.flush().await?;

        check_length(total, written)?;

        if self.config.verify_checksums {
            let actual = format!("{:x}", hasher.finalize());
            if actual != model.sha256() {
                return Err(DownloadError::ChecksumMismatch {
                    expected: model.sha256().to_string(),
                    actual,
                });
            }
        }

        Ok(Some(written))
    }
}

/// `small.pt` -> `small.pt.part`
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// A declared `Content-Length` must match what was written
fn check_length(expected: Option<u64>, written: u64) -> Result<(), DownloadError> {
    match expected {
        Some(expected) if expected != written => Err(DownloadError::SizeMismatch {
            expected,
            actual: written,
        }),
        _ => Ok(()),
    }
}

/// Deletes the partial file on drop unless `keep` was called
struct PartialFile {
    path: PathBuf,
    keep: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "Could not remove partial download");
            }
        }
    }
}
