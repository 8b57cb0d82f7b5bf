//! NeuronBox - Main Entry Point
//!
//! Serves the Dioxus app and the JSON/SSE API from one process.
//! Uses dioxus::serve() pattern for dx serve compatibility.

use neuronbox::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    use neuronbox::config::load_default_config;
    use neuronbox::domain::ROUTE_TABLE;
    use neuronbox::handlers::{api_router, AppState};
    use neuronbox::shared::logging::init_tracing;
    use std::sync::Arc;

    // Initialize tracing BEFORE dioxus::serve
    init_tracing();

    tracing::info!("Starting NeuronBox...");

    if let Err(e) = ROUTE_TABLE.validate() {
        tracing::error!("Invalid route table: {}", e);
        std::process::exit(1);
    }

    let config = match load_default_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        data_dir = %state.config.data_dir.display(),
        "Models stored under {}",
        state.store.models_dir().display()
    );

    // Server functions reach the same state through AppState::global()
    AppState::install(state.clone());

    dioxus::serve(move || {
        let state = state.clone();
        async move {
            let router = dioxus::server::router(App).merge(api_router(state));
            Ok(router)
        }
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    web_sys::console::log_1(&"[WASM] NeuronBox initialized".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
