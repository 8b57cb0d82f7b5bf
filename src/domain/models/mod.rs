// Domain models (request/response shapes and model catalog)
// Pure Rust, no framework dependencies

pub mod catalog;
pub mod download;
pub mod status;
pub mod transcription;

pub use catalog::{Feature, ModelCatalog, ModelInfo, WhisperModel};
pub use download::{DownloadKey, DownloadStatus, ModelRequest, OperationResponse};
pub use status::ServerStatus;
pub use transcription::{is_audio_file, TranscribeRequest, TranscribeResponse, AUDIO_EXTENSIONS};
