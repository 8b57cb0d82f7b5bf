//! Speech recognition backends
//!
//! The server never loads model weights itself. `WhisperCli` runs the
//! `whisper` command line tool against a downloaded checkpoint and reads
//! back the plain-text transcript it writes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::shared::errors::AppError;

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Recognizer executable `{0}` was not found")]
    NotInstalled(String),

    #[error("Recognizer exited with an error: {0}")]
    Failed(String),

    #[error("Recognizer produced no transcript at {0}")]
    MissingOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TranscribeError> for AppError {
    fn from(e: TranscribeError) -> Self {
        AppError::TranscriptionFailed(e.to_string())
    }
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe `audio` with the checkpoint at `checkpoint`
    async fn transcribe(&self, audio: &Path, checkpoint: &Path) -> Result<String, TranscribeError>;

    /// Whether the backend can run on this machine
    fn is_available(&self) -> bool;
}

pub struct WhisperCli {
    command: String,
    scratch_dir: PathBuf,
}

impl WhisperCli {
    pub fn new(command: impl Into<String>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    fn resolve(&self) -> Option<PathBuf> {
        which::which(&self.command).ok()
    }

    fn build_args(audio: &Path, checkpoint: &Path, output_dir: &Path) -> Vec<std::ffi::OsString> {
        vec![
            audio.into(),
            "--model".into(),
            checkpoint.into(),
            "--output_format".into(),
            "txt".into(),
            "--output_dir".into(),
            output_dir.into(),
            "--verbose".into(),
            "False".into(),
        ]
    }

    async fn run(&self, exe: &Path, audio: &Path, checkpoint: &Path, output_dir: &Path) -> Result<String, TranscribeError> {
        let output = Command::new(exe)
            .args(Self::build_args(audio, checkpoint, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(TranscribeError::Failed(detail));
        }

        let mut name = audio.file_stem().unwrap_or_default().to_os_string();
        name.push(".txt");
        let transcript = output_dir.join(name);
        match tokio::fs::read_to_string(&transcript).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TranscribeError::MissingOutput(transcript))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperCli {
    async fn transcribe(&self, audio: &Path, checkpoint: &Path) -> Result<String, TranscribeError> {
        let exe = self
            .resolve()
            .ok_or_else(|| TranscribeError::NotInstalled(self.command.clone()))?;

        // One directory per run so concurrent requests for the same file don't collide
        let output_dir = self.scratch_dir.join(uuid::Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&output_dir).await?;

        let result = self.run(&exe, audio, checkpoint, &output_dir).await;

        if let Err(e) = tokio::fs::remove_dir_all(&output_dir).await {
            tracing::warn!(path = %output_dir.display(), error = %e, "Could not remove scratch directory");
        }
        result
    }

    fn is_available(&self) -> bool {
        self.resolve().is_some()
    }
}
