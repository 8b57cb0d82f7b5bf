//! Client-side route table
//!
//! The table is plain data: an ordered list of `(path, page)` pairs built at
//! compile time. The Dioxus `Route` enum in `app::routes` mirrors it, and the
//! sidebar navigation is generated from it.

use std::collections::HashSet;
use thiserror::Error;

/// Pages the application can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Dashboard,
    Transcribe,
    Translate,
    Models,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dashboard => "Dashboard",
            Page::Transcribe => "Transcribe",
            Page::Translate => "Translate",
            Page::Models => "Models",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "🏠",
            Page::Dashboard => "📊",
            Page::Transcribe => "🎙️",
            Page::Translate => "🌐",
            Page::Models => "📦",
        }
    }

    /// One-line description shown on the home page cards
    pub fn summary(&self) -> &'static str {
        match self {
            Page::Home => "Start here",
            Page::Dashboard => "Server status, disk usage and running downloads",
            Page::Transcribe => "Turn an audio file into text with a local Whisper model",
            Page::Translate => "Translate text between languages",
            Page::Models => "Download, cancel and delete local models",
        }
    }
}

/// One `(path, page)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("Duplicate route path: {0}")]
    DuplicatePath(&'static str),

    #[error("Route path must start with '/': {0}")]
    RelativePath(&'static str),
}

/// Ordered, immutable route table
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    entries: &'static [RouteEntry],
}

impl RouteTable {
    pub const fn new(entries: &'static [RouteEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [RouteEntry] {
        self.entries
    }

    /// Find the page registered for a history location.
    ///
    /// Only the path portion is compared, by exact string equality. The query
    /// string and fragment are ignored, and an empty location means `/`.
    pub fn resolve(&self, location: &str) -> Option<Page> {
        let path = location_path(location);
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.page)
    }

    /// Reverse lookup: the path a page is registered under
    pub fn path_for(&self, page: Page) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.page == page)
            .map(|entry| entry.path)
    }

    /// Check that every path is absolute and registered once
    pub fn validate(&self) -> Result<(), RouteTableError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in self.entries {
            if !entry.path.starts_with('/') {
                return Err(RouteTableError::RelativePath(entry.path));
            }
            if !seen.insert(entry.path) {
                return Err(RouteTableError::DuplicatePath(entry.path));
            }
        }
        Ok(())
    }
}

fn location_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    match &location[..end] {
        "" => "/",
        path => path,
    }
}

/// The application's routes, in navigation order
pub const ROUTE_TABLE: RouteTable = RouteTable::new(&[
    RouteEntry { path: "/", page: Page::Home },
    RouteEntry { path: "/dashboard", page: Page::Dashboard },
    RouteEntry { path: "/transcribe", page: Page::Transcribe },
    RouteEntry { path: "/translate", page: Page::Translate },
    RouteEntry { path: "/models", page: Page::Models },
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_is_valid() {
        assert_eq!(ROUTE_TABLE.validate(), Ok(()));
    }

    #[test]
    fn test_every_path_resolves_to_its_page() {
        for entry in ROUTE_TABLE.entries() {
            assert_eq!(ROUTE_TABLE.resolve(entry.path), Some(entry.page));
            assert_eq!(ROUTE_TABLE.path_for(entry.page), Some(entry.path));
        }
    }

    #[test]
    fn test_resolve_is_exact() {
        assert_eq!(ROUTE_TABLE.resolve("/models/"), None);
        assert_eq!(ROUTE_TABLE.resolve("/Models"), None);
        assert_eq!(ROUTE_TABLE.resolve("/transcribe/extra"), None);
        assert_eq!(ROUTE_TABLE.resolve("/unknown"), None);
    }

    #[test]
    fn test_resolve_ignores_query_and_fragment() {
        assert_eq!(ROUTE_TABLE.resolve("/models?feature=transcribe"), Some(Page::Models));
        assert_eq!(ROUTE_TABLE.resolve("/translate#output"), Some(Page::Translate));
        assert_eq!(ROUTE_TABLE.resolve(""), Some(Page::Home));
        assert_eq!(ROUTE_TABLE.resolve("?tab=1"), Some(Page::Home));
    }

    #[test]
    fn test_duplicate_path_is_rejected() {
        const BROKEN: RouteTable = RouteTable::new(&[
            RouteEntry { path: "/", page: Page::Home },
            RouteEntry { path: "/models", page: Page::Models },
            RouteEntry { path: "/models", page: Page::Dashboard },
        ]);
        assert_eq!(BROKEN.validate(), Err(RouteTableError::DuplicatePath("/models")));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        const BROKEN: RouteTable = RouteTable::new(&[RouteEntry {
            path: "models",
            page: Page::Models,
        }]);
        assert_eq!(BROKEN.validate(), Err(RouteTableError::RelativePath("models")));
    }
}
