use dioxus::prelude::*;

// Spinner with a caption (BEM: c-loading)
#[component]
pub fn LoadingText(message: String) -> Element {
    rsx! {
        div { class: "c-loading",
            div { class: "c-loading__spinner" }
            p { "{message}" }
        }
    }
}

// BEM: c-error
#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "c-error", role: "alert",
            "❌ {message}"
        }
    }
}

#[component]
pub fn EmptyState(icon: String, title: String, description: String) -> Element {
    rsx! {
        div { class: "c-empty",
            div { "{icon}" }
            h3 { "{title}" }
            p { "{description}" }
        }
    }
}
