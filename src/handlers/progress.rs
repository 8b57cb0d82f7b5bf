//! SSE stream of download progress
//!
//! Emits `data: <percent>` while the download is registered and a final
//! `event: done` once it is gone. A stream opened before its download
//! starts waits up to the configured idle timeout.

use axum::{
    extract::Path,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Extension,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::state::AppState;
use crate::domain::models::DownloadKey;
use crate::infrastructure::DownloadRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressUpdate {
    Progress(f64),
    Done,
}

impl From<ProgressUpdate> for Event {
    fn from(update: ProgressUpdate) -> Self {
        match update {
            ProgressUpdate::Progress(percent) => Event::default().data(percent.to_string()),
            ProgressUpdate::Done => Event::default().event("done").data("done"),
        }
    }
}

/// Poll the registry every `interval` until the download goes away.
/// The task stops as soon as the receiver is dropped.
pub fn watch_progress(
    registry: DownloadRegistry,
    key: Option<DownloadKey>,
    interval: Duration,
    idle_timeout: Duration,
) -> mpsc::Receiver<ProgressUpdate> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut seen_active = false;
        let mut waited = Duration::ZERO;

        loop {
            let update = match key.and_then(|key| registry.progress(&key)) {
                Some(percent) => {
                    seen_active = true;
                    Some(ProgressUpdate::Progress(percent))
                }
                None if seen_active || key.is_none() || waited >= idle_timeout => {
                    let _ = tx.send(ProgressUpdate::Done).await;
                    break;
                }
                None => None,
            };

            if let Some(update) = update {
                if tx.send(update).await.is_err() {
                    break;
                }
            } else if tx.is_closed() {
                break;
            }

            tokio::time::sleep(interval).await;
            waited += interval;
        }
    });

    rx
}

/// GET /api/download-progress/{feature}/{model}
pub async fn download_progress_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((feature, model)): Path<(String, String)>,
) -> impl IntoResponse {
    let key = DownloadKey::parse(&feature, &model).ok();
    tracing::debug!(feature = %feature, model = %model, known = key.is_some(), "Progress stream opened");

    let downloads = &state.config.downloads;
    let mut updates = watch_progress(
        state.downloads.clone(),
        key,
        downloads.progress_interval(),
        downloads.idle_timeout(),
    );

    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(16);
    tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            if tx.send(Ok(update.into())).await.is_err() {
                break;
            }
        }
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Feature, WhisperModel};

    const TICK: Duration = Duration::from_millis(10);

    fn key() -> DownloadKey {
        DownloadKey::new(Feature::Transcribe, WhisperModel::Small)
    }

    #[tokio::test]
    async fn test_reports_progress_then_done() {
        let registry = DownloadRegistry::new();
        let handle = registry.begin(key()).unwrap();
        handle.set_progress(42.0);

        let mut updates = watch_progress(registry.clone(), Some(key()), TICK, Duration::from_secs(5));
        assert_eq!(updates.recv().await, Some(ProgressUpdate::Progress(42.0)));

        drop(handle);
        let mut last = None;
        while let Some(update) = updates.recv().await {
            last = Some(update);
        }
        assert_eq!(last, Some(ProgressUpdate::Done));
    }

    #[tokio::test]
    async fn test_gives_up_when_download_never_starts() {
        let registry = DownloadRegistry::new();
        let mut updates = watch_progress(registry, Some(key()), TICK, Duration::from_millis(30));

        assert_eq!(updates.recv().await, Some(ProgressUpdate::Done));
        assert_eq!(updates.recv().await, None);
    }

    #[tokio::test]
    async fn test_unknown_key_is_done_immediately() {
        let mut updates = watch_progress(DownloadRegistry::new(), None, TICK, Duration::from_secs(5));
        assert_eq!(updates.recv().await, Some(ProgressUpdate::Done));
    }
}
