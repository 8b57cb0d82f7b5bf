//! Router, application root and page layout

use dioxus::prelude::*;
use dioxus::document;

use crate::app::layouts::{Navbar, Sidebar};
use crate::app::pages::{Dashboard, Home, Models, PageNotFound, Transcribe, Translate};
use crate::domain::{Page, ROUTE_TABLE};

/// Mirrors `ROUTE_TABLE`; anything unmatched falls through to `PageNotFound`
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/transcribe")]
    Transcribe {},
    #[route("/translate")]
    Translate {},
    #[route("/models")]
    Models {},
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Home => Route::Home {},
            Page::Dashboard => Route::Dashboard {},
            Page::Transcribe => Route::Transcribe {},
            Page::Translate => Route::Translate {},
            Page::Models => Route::Models {},
        }
    }
}

impl Route {
    /// Looked up in `ROUTE_TABLE`; `None` for the not-found fallback
    pub fn page(&self) -> Option<Page> {
        ROUTE_TABLE.resolve(&self.to_string())
    }

    pub fn document_title(&self) -> String {
        let title = self.page().map(|page| page.title()).unwrap_or("Page not found");
        format!("NeuronBox · {title}")
    }
}

#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("NeuronBox app mounted");
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    // Produced by build.rs from assets/css/main.css
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");
    let route = use_route::<Route>();

    rsx! {
        document::Title { "{route.document_title()}" }
        document::Link {
            rel: "stylesheet",
            href: BUNDLE_CSS
        },
        div { class: "c-layout",
            Navbar {}

            div { class: "c-layout__body",
                Sidebar {}

                main { class: "c-layout__main",
                    Outlet::<Route> {}
                }
            }
        }
    }
}
