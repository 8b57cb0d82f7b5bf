use dioxus::prelude::*;

use crate::domain::{Page, ROUTE_TABLE};

#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    let home = ROUTE_TABLE.path_for(Page::Home).unwrap_or("/");
    tracing::debug!(path = %path, "No route matched");

    rsx! {
        h1 { class: "c-page__title", "Page not found" }
        p { class: "c-page__lead", "Nothing lives at {path}." }
        Link { to: home, class: "c-button c-button--primary", "Back to home" }
    }
}
