//! Query-string routing.
//!
//! URL format: `/` for the search page, `/?id=123` for a recipe detail page.

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::utils::dom;

/// Application routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Search page: no `id` parameter.
    Home,
    /// Recipe detail page: `?id=<id>`. The id is kept raw; the detail view
    /// decides whether it resolves.
    Detail { id: String },
}

impl AppRoute {
    /// Detail route for a recipe id.
    pub fn detail(id: u64) -> Self {
        Self::Detail { id: id.to_string() }
    }

    /// Parse a URL query string (with or without the leading '?').
    pub fn from_search(search: &str) -> Self {
        let search = search.trim_start_matches('?');

        search
            .split('&')
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| *key == "id")
            .map(|(_, value)| Self::Detail {
                id: percent_decode_str(value).decode_utf8_lossy().trim().to_string(),
            })
            .unwrap_or(Self::Home)
    }

    /// Query string for this route (empty for [`AppRoute::Home`]).
    pub fn to_search(&self) -> String {
        match self {
            Self::Home => String::new(),
            Self::Detail { id } => format!("?id={}", utf8_percent_encode(id, NON_ALPHANUMERIC)),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Self::Detail { .. })
    }

    /// Get current route from browser URL
    pub fn current() -> Self {
        Self::from_search(&dom::get_search())
    }

    /// Update browser URL to match this route (using pushState)
    pub fn push(&self) {
        let url = format!("{}{}", dom::get_pathname(), self.to_search());
        dom::push_url(&url);
    }
}
