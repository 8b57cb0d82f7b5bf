//! Server configuration
//!
//! ```text
//! config.toml (optional)
//!     → loader.rs (read, parse, validate)
//!     → AppConfig (immutable)
//!     → shared via Arc<AppState> to handlers and server functions
//! ```
//!
//! Every field has a default, so a missing file yields a working setup.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_default_config, parse_config, validate_config, ConfigError, CONFIG_ENV};
pub use schema::{AppConfig, DownloadsConfig, TranscriptionConfig};
