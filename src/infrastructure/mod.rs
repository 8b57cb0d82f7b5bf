// Server-side adapters: filesystem, HTTP downloads, external recognizer

pub mod downloads;
pub mod storage;
pub mod transcriber;

pub use downloads::{DownloadError, DownloadOutcome, DownloadRegistry, ModelDownloader};
pub use storage::ModelStore;
pub use transcriber::{TranscribeError, Transcriber, WhisperCli};
