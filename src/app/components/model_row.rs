//! One catalog entry with its download, cancel and delete actions

use dioxus::prelude::*;

use crate::app::components::{Button, ButtonVariant, ErrorMessage, ProgressBar};
use crate::domain::models::{DownloadKey, Feature, ModelInfo, OperationResponse};
use crate::server_fns::{cancel_download, delete_model, download_model};
use crate::shared::hooks::use_download_progress;
use crate::shared::utils::format_bytes;

fn failure(result: Result<OperationResponse, ServerFnError>) -> Option<String> {
    match result {
        Ok(response) if response.success => None,
        Ok(response) => Some(response.error.unwrap_or_else(|| "Request failed".to_string())),
        Err(e) => Some(e.to_string()),
    }
}

#[component]
pub fn ModelRow(feature: Feature, model: ModelInfo, on_changed: EventHandler<()>) -> Element {
    let mut progress = use_download_progress();
    let mut error = use_signal(|| None::<String>);
    let mut deleting = use_signal(|| false);

    let key = DownloadKey::parse(feature.as_str(), &model.name).ok();
    let downloading = *progress.in_flight.read();

    let download_name = model.name.clone();
    let on_download = move |_: MouseEvent| {
        let name = download_name.clone();
        error.set(None);
        if let Some(key) = key {
            progress.start(key);
        }
        spawn(async move {
            let result = download_model(feature.to_string(), name).await;
            error.set(failure(result));
            progress.finish();
            on_changed.call(());
        });
    };

    let cancel_name = model.name.clone();
    let on_cancel = move |_: MouseEvent| {
        let name = cancel_name.clone();
        spawn(async move {
            // The pending download request reports the outcome
            if let Some(message) = failure(cancel_download(feature.to_string(), name).await) {
                error.set(Some(message));
            }
        });
    };

    let delete_name = model.name.clone();
    let on_delete = move |_: MouseEvent| {
        let name = delete_name.clone();
        deleting.set(true);
        spawn(async move {
            error.set(failure(delete_model(feature.to_string(), name).await));
            deleting.set(false);
            on_changed.call(());
        });
    };

    rsx! {
        div { class: "c-model-row",
            div {
                div { class: "c-model-row__name", "{model.name}" }
                div { class: "c-model-row__meta",
                    "{model.description}"
                    if model.downloaded {
                        " · {format_bytes(model.size)}"
                    }
                }
            }

            div { class: "c-model-row__actions",
                if downloading {
                    if let Some(percent) = *progress.percent.read() {
                        ProgressBar { percent }
                    }
                    Button { variant: ButtonVariant::Secondary, onclick: on_cancel, "Cancel" }
                } else if model.downloaded {
                    Button {
                        variant: ButtonVariant::Danger,
                        busy: deleting(),
                        onclick: on_delete,
                        "Delete"
                    }
                } else {
                    Button { onclick: on_download, "Download" }
                }
            }
        }
        if let Some(message) = error() {
            ErrorMessage { message }
        }
    }
}
