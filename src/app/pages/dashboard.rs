use dioxus::prelude::*;

use crate::app::components::{Button, ButtonVariant, Card, EmptyState, ErrorMessage, LoadingText, ProgressBar};
use crate::server_fns::get_server_status;
use crate::shared::utils::format_bytes;

#[component]
pub fn Dashboard() -> Element {
    let mut status = use_server_future(move || async move { get_server_status().await })?;

    let body = match &*status.read() {
        Some(Ok(summary)) => {
            let whisper = if summary.transcriber_available { "Installed" } else { "Not found" };
            rsx! {
                div { class: "c-stat-grid",
                    Card {
                        div { class: "c-stat__value", "{summary.models_downloaded} / {summary.models_available}" }
                        div { class: "c-stat__label", "Models downloaded" }
                    }
                    Card {
                        div { class: "c-stat__value", "{format_bytes(summary.bytes_on_disk)}" }
                        div { class: "c-stat__label", "Disk used by models" }
                    }
                    Card {
                        div { class: "c-stat__value", "{whisper}" }
                        div { class: "c-stat__label", "Whisper command" }
                    }
                    Card {
                        div { class: "c-stat__value", "v{summary.version}" }
                        div { class: "c-stat__label", "{summary.data_dir}" }
                    }
                }

                Card { title: "Active downloads",
                    if summary.active_downloads.is_empty() {
                        EmptyState {
                            icon: "📭",
                            title: "Nothing downloading",
                            description: "Start a download from the Models page.",
                        }
                    }
                    for download in summary.active_downloads.iter() {
                        div { key: "{download.key}", class: "c-model-row",
                            div {
                                div { class: "c-model-row__name", "{download.model}" }
                                div { class: "c-model-row__meta",
                                    if download.cancel_requested { "canceling…" } else { "{download.feature}" }
                                }
                            }
                            ProgressBar { percent: download.progress }
                        }
                    }
                }
            }
        }
        Some(Err(e)) => rsx! {
            ErrorMessage { message: format!("Could not load server status: {e}") }
        },
        None => rsx! {
            LoadingText { message: "Loading status..." }
        },
    };

    rsx! {
        h1 { class: "c-page__title", "Dashboard" }
        Button {
            variant: ButtonVariant::Secondary,
            onclick: move |_| status.restart(),
            "Refresh"
        }
        {body}
    }
}
