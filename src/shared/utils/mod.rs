// Utility functions
// Formatting helpers shared by pages and components

pub mod format;

pub use format::{format_bytes, format_elapsed, format_progress};
