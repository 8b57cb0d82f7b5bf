use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::{Page, ROUTE_TABLE};

/// Landing page: one card per feature page
#[component]
pub fn Home() -> Element {
    let features = ROUTE_TABLE
        .entries()
        .iter()
        .map(|entry| entry.page)
        .filter(|page| *page != Page::Home);

    rsx! {
        h1 { class: "c-page__title", "Welcome to NeuronBox" }
        p { class: "c-page__lead",
            "Run speech models on your own machine. Download a Whisper model, then transcribe audio files without sending them anywhere."
        }

        div { class: "c-feature-grid",
            for page in features {
                Link {
                    key: "{page.title()}",
                    to: Route::from(page),
                    class: "c-feature-card",
                    div { class: "c-feature-card__icon", "{page.icon()}" }
                    h3 { "{page.title()}" }
                    p { "{page.summary()}" }
                }
            }
        }
    }
}
