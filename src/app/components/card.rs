use dioxus::prelude::*;

#[component]
pub fn Card(title: Option<String>, children: Element) -> Element {
    rsx! {
        section { class: "c-card",
            if let Some(title) = title {
                h3 { class: "c-card__title", "{title}" }
            }
            {children}
        }
    }
}
