// Custom Dioxus hooks
pub mod use_download_progress;

pub use use_download_progress::{parse_progress, progress_url, use_download_progress, DownloadProgress};
