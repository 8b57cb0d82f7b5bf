use dioxus::prelude::*;

use crate::shared::utils::format_progress;

/// Horizontal bar filled to `percent` (0 to 100)
#[component]
pub fn ProgressBar(percent: f64) -> Element {
    let width = percent.clamp(0.0, 100.0);
    let label = format_progress(width);

    rsx! {
        div { class: "c-progress", title: "{label}",
            div {
                class: "c-progress__bar",
                style: "width: {width}%;",
            }
        }
        small { "{label}" }
    }
}
