//! In-memory registry of running model downloads
//!
//! At most one download per key. The entry lives exactly as long as the
//! `DownloadHandle` returned by `begin`, so completion, failure and
//! cancellation all clear it the same way.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::models::{DownloadKey, DownloadStatus};
use crate::shared::errors::{AppError, Result};

struct ActiveDownload {
    progress: f64,
    cancelled: Arc<AtomicBool>,
    started_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct DownloadRegistry {
    active: Arc<DashMap<DownloadKey, ActiveDownload>>,
}

impl DownloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a download, failing if one is already running for the key
    pub fn begin(&self, key: DownloadKey) -> Result<DownloadHandle> {
        match self.active.entry(key) {
            Entry::Occupied(_) => Err(AppError::DownloadAlreadyActive(key.to_string())),
            Entry::Vacant(slot) => {
                let cancelled = Arc::new(AtomicBool::new(false));
                slot.insert(ActiveDownload {
                    progress: 0.0,
                    cancelled: cancelled.clone(),
                    started_at: Utc::now(),
                });
                Ok(DownloadHandle {
                    key,
                    cancelled,
                    registry: self.clone(),
                })
            }
        }
    }

    /// Current percentage, `None` when nothing is running for the key
    pub fn progress(&self, key: &DownloadKey) -> Option<f64> {
        self.active.get(key).map(|entry| entry.progress)
    }

    pub fn is_active(&self, key: &DownloadKey) -> bool {
        self.active.contains_key(key)
    }

    /// Ask a running download to stop. Returns false if none was running.
    pub fn cancel(&self, key: &DownloadKey) -> bool {
        match self.active.get(key) {
            Some(entry) => {
                entry.cancelled.store(true, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    /// Snapshot of every running download, ordered by key
    pub fn active(&self) -> Vec<DownloadStatus> {
        let mut statuses: Vec<DownloadStatus> = self
            .active
            .iter()
            .map(|entry| DownloadStatus {
                key: entry.key().to_string(),
                feature: entry.key().feature,
                model: entry.key().model,
                progress: entry.progress,
                cancel_requested: entry.cancelled.load(Ordering::SeqCst),
                started_at: entry.started_at,
            })
            .collect();
        statuses.sort_by(|a, b| a.key.cmp(&b.key));
        statuses
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Owned by the task performing the download
pub struct DownloadHandle {
    key: DownloadKey,
    cancelled: Arc<AtomicBool>,
    registry: DownloadRegistry,
}

impl DownloadHandle {
    pub fn key(&self) -> DownloadKey {
        self.key
    }

    pub fn set_progress(&self, percent: f64) {
        if let Some(mut entry) = self.registry.active.get_mut(&self.key) {
            entry.progress = percent.clamp(0.0, 100.0);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for DownloadHandle {
    fn drop(&mut self) {
        self.registry.active.remove(&self.key);
    }
}
