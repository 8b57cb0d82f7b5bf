use dioxus::prelude::*;

use crate::app::components::{Card, ErrorMessage, LoadingText, ModelRow};
use crate::server_fns::get_model_catalog;
use crate::shared::utils::format_bytes;

#[component]
pub fn Models() -> Element {
    let mut catalog = use_server_future(move || async move { get_model_catalog().await })?;

    let content = match &*catalog.read() {
        Some(Ok(catalog_data)) => {
            let total = format_bytes(catalog_data.bytes_on_disk());
            rsx! {
                p { class: "c-page__lead", "Models use {total} on disk." }
                for (feature, models) in catalog_data.models.iter() {
                    Card { key: "{feature}", title: "{feature}",
                        for info in models.iter() {
                            ModelRow {
                                key: "{info.name}",
                                feature: *feature,
                                model: info.clone(),
                                on_changed: move |_| catalog.restart(),
                            }
                        }
                    }
                }
            }
        }
        Some(Err(e)) => rsx! {
            ErrorMessage { message: format!("Could not load models: {e}") }
        },
        None => rsx! {
            LoadingText { message: "Loading models..." }
        },
    };

    rsx! {
        h1 { class: "c-page__title", "Models" }
        {content}
    }
}
