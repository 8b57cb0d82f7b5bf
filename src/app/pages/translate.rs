use dioxus::prelude::*;

use crate::app::components::{Card, EmptyState};

/// No translation model ships yet; the page reserves the slot in navigation
#[component]
pub fn Translate() -> Element {
    rsx! {
        h1 { class: "c-page__title", "Translate" }
        Card {
            EmptyState {
                icon: "🌐",
                title: "Translation is not available yet",
                description: "No translation model can be downloaded at the moment. Transcription works today.",
            }
        }
    }
}
