use dioxus::prelude::*;

use crate::app::routes::Route;
use crate::domain::ROUTE_TABLE;

/// One link per route table entry, in table order
#[component]
pub fn Sidebar() -> Element {
    rsx! {
        aside { class: "c-sidebar",
            nav { class: "c-sidebar__nav",
                for entry in ROUTE_TABLE.entries() {
                    Link {
                        key: "{entry.path}",
                        to: Route::from(entry.page),
                        class: "c-sidebar__link",
                        active_class: "c-sidebar__link--active",
                        span { "{entry.page.icon()}" }
                        span { "{entry.page.title()}" }
                    }
                }
            }
        }
    }
}
