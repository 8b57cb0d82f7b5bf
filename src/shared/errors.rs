use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("You must download the model \"{0}\" before you can use it")]
    ModelNotDownloaded(String),

    #[error("File does not exist")]
    FileNotFound,

    #[error("{0} is not an audio file")]
    NotAudioFile(String),

    #[error("Download {0} is not active")]
    DownloadNotActive(String),

    #[error("Download {0} is already active")]
    DownloadAlreadyActive(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Startup error: {0}")]
    Startup(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Errors caused by the request itself, reported in-band to the client
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFeature(_)
                | AppError::InvalidModel(_)
                | AppError::ModelNotDownloaded(_)
                | AppError::FileNotFound
                | AppError::NotAudioFile(_)
                | AppError::DownloadNotActive(_)
                | AppError::DownloadAlreadyActive(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
