use serde::{Deserialize, Serialize};

use super::download::DownloadStatus;

/// Summary rendered by the dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub version: String,
    pub data_dir: String,
    pub models_downloaded: usize,
    pub models_available: usize,
    pub bytes_on_disk: u64,
    pub active_downloads: Vec<DownloadStatus>,
    /// Whether the external recognizer executable was found on this machine
    pub transcriber_available: bool,
}
