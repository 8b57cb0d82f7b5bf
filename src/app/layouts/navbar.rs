use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::server_fns::get_server_status;

/// Top bar: logo plus a recognizer availability badge
#[component]
pub fn Navbar() -> Element {
    let status = use_server_future(move || async move { get_server_status().await })?;

    let badge = match &*status.read() {
        Some(Ok(status)) if status.transcriber_available => "● whisper ready",
        Some(Ok(_)) => "○ whisper not installed",
        Some(Err(_)) => "○ server unreachable",
        None => "…",
    };

    rsx! {
        nav { class: "c-navbar",
            Link {
                to: Route::Home {},
                class: "c-navbar__logo",
                "🧠 NeuronBox"
            }
            span { class: "c-navbar__status", "{badge}" }
        }
    }
}
