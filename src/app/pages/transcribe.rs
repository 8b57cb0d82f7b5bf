use dioxus::prelude::*;

use crate::app::components::{Button, Card, EmptyState, ErrorMessage, LoadingText};
use crate::app::routes::Route;
use crate::domain::models::{Feature, TranscribeResponse, AUDIO_EXTENSIONS};
use crate::server_fns::{get_model_catalog, transcribe_file};
use crate::shared::utils::format_elapsed;

/// Transcript text and elapsed time, or the message to show instead
fn describe_outcome(response: &TranscribeResponse) -> Result<(String, String), String> {
    if response.success {
        let text = response.result.as_deref().unwrap_or_default().to_string();
        let took = format_elapsed(response.time_elapsed.unwrap_or_default());
        Ok((text, took))
    } else {
        Err(response
            .error
            .clone()
            .unwrap_or_else(|| "Transcription failed".to_string()))
    }
}

#[component]
pub fn Transcribe() -> Element {
    let catalog = use_server_future(move || async move { get_model_catalog().await })?;

    let mut filename = use_signal(String::new);
    let mut model = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut outcome = use_signal(|| None::<Result<TranscribeResponse, String>>);

    let downloaded: Vec<String> = match &*catalog.read() {
        Some(Ok(catalog)) => catalog
            .for_feature(Feature::Transcribe)
            .iter()
            .filter(|info| info.downloaded)
            .map(|info| info.name.clone())
            .collect(),
        _ => Vec::new(),
    };
    let load_error = match &*catalog.read() {
        Some(Err(e)) => Some(e.to_string()),
        _ => None,
    };
    let loading = catalog.read().is_none();

    // Fall back to the first downloaded model until the user picks one
    let selected = if model.read().is_empty() {
        downloaded.first().cloned().unwrap_or_default()
    } else {
        model()
    };
    let accepted = AUDIO_EXTENSIONS.join(", ");

    let result_view = match outcome().map(|result| result.and_then(|response| describe_outcome(&response))) {
        Some(Ok((text, took))) => rsx! {
            Card { title: "Transcript",
                p { class: "c-transcript", "{text}" }
                small { "Took {took}" }
            }
        },
        Some(Err(message)) => rsx! {
            ErrorMessage { message }
        },
        None => rsx! {},
    };

    let submit_model = selected.clone();
    let on_submit = move |_: MouseEvent| {
        let file = filename();
        let chosen = submit_model.clone();
        busy.set(true);
        outcome.set(None);
        spawn(async move {
            let result = transcribe_file(file, chosen).await.map_err(|e| e.to_string());
            outcome.set(Some(result));
            busy.set(false);
        });
    };

    rsx! {
        h1 { class: "c-page__title", "Transcribe" }
        p { class: "c-page__lead", "Convert an audio file on this machine to text. Accepted formats: {accepted}." }

        if loading {
            LoadingText { message: "Loading models..." }
        } else if let Some(message) = load_error {
            ErrorMessage { message }
        } else if downloaded.is_empty() {
            Card {
                EmptyState {
                    icon: "📦",
                    title: "No model downloaded",
                    description: "Download a Whisper model before transcribing.",
                }
                Link { to: Route::Models {}, class: "c-button c-button--primary", "Go to Models" }
            }
        } else {
            Card {
                div { class: "c-form",
                    label { "Audio file path" }
                    input {
                        r#type: "text",
                        placeholder: "/home/me/recordings/interview.wav",
                        value: "{filename}",
                        oninput: move |evt| filename.set(evt.value()),
                    }
                    label { "Model" }
                    select {
                        value: "{selected}",
                        onchange: move |evt| model.set(evt.value()),
                        for name in downloaded.iter() {
                            option { key: "{name}", value: "{name}", "{name}" }
                        }
                    }
                    Button {
                        busy: busy(),
                        disabled: filename.read().trim().is_empty(),
                        onclick: on_submit,
                        "Transcribe"
                    }
                }
            }
        }

        {result_view}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_completed_transcript() {
        let response = TranscribeResponse::completed("hello there", 2.5);
        let (text, took) = describe_outcome(&response).unwrap();
        assert_eq!(text, "hello there");
        assert_eq!(took, format_elapsed(2.5));
        // The response stays usable after describing it
        assert_eq!(response.result.as_deref(), Some("hello there"));
    }

    #[test]
    fn test_describe_failure() {
        let response = TranscribeResponse::failed("File does not exist");
        assert_eq!(describe_outcome(&response).unwrap_err(), "File does not exist");

        let bare = TranscribeResponse::default();
        assert_eq!(describe_outcome(&bare).unwrap_err(), "Transcription failed");
    }
}
