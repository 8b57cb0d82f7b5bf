// Model downloads: who is downloading what, and the HTTP transfer itself

pub mod fetcher;
pub mod registry;

pub use fetcher::{partial_path, DownloadError, DownloadOutcome, ModelDownloader};
pub use registry::{DownloadHandle, DownloadRegistry};
