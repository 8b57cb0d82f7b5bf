use dioxus::prelude::*;

use crate::domain::models::DownloadKey;

/// Path of the server-sent progress stream for a download
pub fn progress_url(key: &DownloadKey) -> String {
    format!("/api/download-progress/{}/{}", key.feature, key.model)
}

/// Progress events carry the percentage as plain text
pub fn parse_progress(data: &str) -> Option<f64> {
    data.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(0.0, 100.0))
}

/// Live progress of a single model download
#[derive(Clone, Copy)]
pub struct DownloadProgress {
    pub percent: Signal<Option<f64>>,
    pub in_flight: Signal<bool>,
}

impl DownloadProgress {
    pub fn start(&mut self, key: DownloadKey) {
        self.in_flight.set(true);
        self.percent.set(Some(0.0));
        self.subscribe(key);
    }

    pub fn finish(&mut self) {
        self.in_flight.set(false);
        self.percent.set(None);
    }

    #[cfg(target_arch = "wasm32")]
    fn subscribe(&self, key: DownloadKey) {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;
        use web_sys::{EventSource, MessageEvent};

        let url = progress_url(&key);
        let source = match EventSource::new(&url) {
            Ok(source) => source,
            Err(e) => {
                tracing::error!("Failed to open progress stream {}: {:?}", url, e);
                return;
            }
        };

        let mut percent = self.percent;
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Some(value) = event.data().as_string().as_deref().and_then(parse_progress) {
                percent.set(Some(value));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        onmessage.forget();

        // The server ends the stream with a `done` event; closing stops EventSource reconnecting
        let source_for_done = source.clone();
        let ondone = Closure::wrap(Box::new(move |_: web_sys::Event| {
            source_for_done.close();
        }) as Box<dyn FnMut(web_sys::Event)>);
        if let Err(e) = source.add_event_listener_with_callback("done", ondone.as_ref().unchecked_ref()) {
            tracing::warn!("Failed to listen for end of progress stream: {:?}", e);
        }
        ondone.forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn subscribe(&self, key: DownloadKey) {
        tracing::debug!("Progress stream not available outside the browser: {}", key);
    }
}

pub fn use_download_progress() -> DownloadProgress {
    let percent = use_signal(|| None::<f64>);
    let in_flight = use_signal(|| false);

    DownloadProgress { percent, in_flight }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Feature, WhisperModel};

    #[test]
    fn test_progress_url() {
        let key = DownloadKey::new(Feature::Transcribe, WhisperModel::Medium);
        assert_eq!(progress_url(&key), "/api/download-progress/transcribe/medium");
    }

    #[test]
    fn test_parse_progress() {
        assert_eq!(parse_progress("12.5"), Some(12.5));
        assert_eq!(parse_progress(" 100 \n"), Some(100.0));
        assert_eq!(parse_progress("140"), Some(100.0));
        assert_eq!(parse_progress("NaN"), None);
        assert_eq!(parse_progress("ping"), None);
    }
}
