//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

use crate::utils::storage::KeyValueStore;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the page header.
pub const APP_NAME: &str = "RecipeBook";

// =============================================================================
// Network Configuration
// =============================================================================

/// Upstream recipe service host (also sent as the `X-RapidAPI-Host` header).
pub const API_HOST: &str = "spoonacular-recipe-food-nutrition-v1.p.rapidapi.com";

/// Header carrying the API credential.
pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";

/// Header carrying the upstream host.
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 12_000;

/// Number of recipes requested per search.
pub const SEARCH_LIMIT: u32 = 5;

/// Number of recipes requested per suggestion refresh.
pub const SUGGESTION_LIMIT: u32 = 5;

/// Upstream endpoint paths.
pub mod endpoints {
    pub const COMPLEX_SEARCH: &str = "/recipes/complexSearch";
    pub const RANDOM: &str = "/recipes/random";
}

/// Build-time API credential (`RECIPEBOOK_API_KEY`).
pub const BUILD_API_KEY: Option<&str> = option_env!("RECIPEBOOK_API_KEY");

// =============================================================================
// Cache Configuration
// =============================================================================

/// Maximum number of recent searches kept.
pub const MAX_RECENT_SEARCHES: usize = 10;

/// localStorage keys.
pub mod storage_keys {
    pub const API_KEY: &str = "recipebook:apiKey";
    pub const RECENT_SEARCHES: &str = "recipebook:recentSearches";
    pub const LAST_SEARCH_STATE: &str = "recipebook:lastSearchState";
    pub const LAST_RESULTS: &str = "recipebook:lastSearchResults";
    pub const LAST_SUGGESTIONS: &str = "recipebook:lastSuggestions";
    pub const RECIPES_BY_ID: &str = "recipebook:recipeById";
}

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

/// Image shown when a recipe has none.
pub const FALLBACK_IMAGE: &str = "/assets/images/recipe-fallback.svg";

/// User-facing messages.
pub mod messages {
    pub const EMPTY_QUERY: &str = "Enter a keyword or an ingredient to search.";
    pub const BUSY: &str = "Hang on, the previous request is still running.";
    pub const NO_RESULTS: &str = "No recipes found. Try different keywords or ingredients.";
    pub const NO_RECIPE_SELECTED: &str = "No recipe selected.";
    pub const RECIPE_NOT_CACHED: &str = "We couldn't find that recipe in cache.";
    pub const TIMEOUT: &str = "The request timed out. Please try again.";
    pub const NETWORK_FALLBACK: &str = "Network error contacting API.";
    pub const UPSTREAM_FALLBACK: &str = "Request failed";
    pub const MISSING_API_KEY: &str =
        "No API key configured. Set RECIPEBOOK_API_KEY or the recipebook:apiKey storage entry.";
}

/// Resolve the API credential.
///
/// A non-blank value stored under [`storage_keys::API_KEY`] wins over the
/// build-time key. Returns an empty string when neither is set.
pub fn resolve_api_key(store: &impl KeyValueStore) -> String {
    store
        .get_item(storage_keys::API_KEY)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .or_else(|| BUILD_API_KEY.map(|key| key.trim().to_string()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    #[test]
    fn test_stored_api_key_takes_precedence() {
        let store = MemoryStore::new();
        store.set_item(storage_keys::API_KEY, "  from-storage ").unwrap();
        assert_eq!(resolve_api_key(&store), "from-storage");
    }

    #[test]
    fn test_blank_stored_key_falls_back_to_build_key() {
        let store = MemoryStore::new();
        store.set_item(storage_keys::API_KEY, "   ").unwrap();
        let expected = BUILD_API_KEY.map(str::trim).unwrap_or_default();
        assert_eq!(resolve_api_key(&store), expected);
    }
}
