//! Client-side recipe cache.
//!
//! Persists the last search, last results, last suggestions, the bounded
//! recent-search history and an id → recipe index as JSON values in a
//! [`KeyValueStore`].
//!
//! The cache is best-effort: reads of missing, unreadable or malformed
//! entries return an empty default, and failed writes are logged and
//! dropped. Nothing here ever fails the caller.

use std::collections::BTreeMap;

use serde::{Serialize, de::DeserializeOwned};

use crate::config::{MAX_RECENT_SEARCHES, storage_keys};
use crate::core::error::CacheError;
use crate::models::{RecentSearch, Recipe, SearchQuery};
use crate::utils::storage::KeyValueStore;
use crate::utils::{clock, log};

/// id → recipe index. Serialized as a JSON object keyed by the decimal id.
pub type RecipeIndex = BTreeMap<u64, Recipe>;

pub struct RecipeCache<S> {
    store: S,
}

impl<S: KeyValueStore> RecipeCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let Some(json) = self.store.get_item(key) else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| CacheError::Malformed(e.to_string()))
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.read(key) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                log::warn(&format!("ignoring cache entry {}: {}", key, e));
                T::default()
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|_| CacheError::SerializationFailed)
            .and_then(|json| self.store.set_item(key, &json));
        if let Err(e) = result {
            log::warn(&format!("cache write to {} dropped: {}", key, e));
        }
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    pub fn write_last_search(&self, query: &SearchQuery) {
        self.write(storage_keys::LAST_SEARCH_STATE, query);
    }

    pub fn write_last_results(&self, recipes: &[Recipe]) {
        self.write(storage_keys::LAST_RESULTS, recipes);
    }

    pub fn write_last_suggestions(&self, recipes: &[Recipe]) {
        self.write(storage_keys::LAST_SUGGESTIONS, recipes);
    }

    /// Upsert each recipe by id. Existing entries not in `recipes` are kept.
    pub fn merge_recipes_by_id(&self, recipes: &[Recipe]) {
        if recipes.is_empty() {
            return;
        }
        let mut index = self.read_recipes_by_id();
        for recipe in recipes {
            index.insert(recipe.id, recipe.clone());
        }
        self.write(storage_keys::RECIPES_BY_ID, &index);
    }

    /// Record `query` as the newest recent search, stamped with the current time.
    pub fn append_recent_search(&self, query: &SearchQuery) {
        self.append_recent_search_at(query, clock::now_ms());
    }

    /// Record `query` as the newest recent search.
    ///
    /// An existing entry with the same canonical key is removed first, then
    /// the list is cut to [`MAX_RECENT_SEARCHES`].
    pub fn append_recent_search_at(&self, query: &SearchQuery, timestamp: u64) {
        let entry = RecentSearch::new(query, timestamp);
        let mut list = self.read_recent_searches();
        list.retain(|existing| existing.canonical_key != entry.canonical_key);
        list.insert(0, entry);
        list.truncate(MAX_RECENT_SEARCHES);
        self.write(storage_keys::RECENT_SEARCHES, &list);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn read_last_search(&self) -> Option<SearchQuery> {
        self.read_or_default(storage_keys::LAST_SEARCH_STATE)
    }

    pub fn read_last_results(&self) -> Vec<Recipe> {
        self.read_or_default(storage_keys::LAST_RESULTS)
    }

    pub fn read_last_suggestions(&self) -> Vec<Recipe> {
        self.read_or_default(storage_keys::LAST_SUGGESTIONS)
    }

    pub fn read_recipes_by_id(&self) -> RecipeIndex {
        self.read_or_default(storage_keys::RECIPES_BY_ID)
    }

    /// Newest first, at most [`MAX_RECENT_SEARCHES`] entries.
    pub fn read_recent_searches(&self) -> Vec<RecentSearch> {
        self.read_or_default(storage_keys::RECENT_SEARCHES)
    }

    pub fn most_recent_search(&self) -> Option<RecentSearch> {
        self.read_recent_searches().into_iter().next()
    }

    pub fn find_recent(&self, canonical_key: &str) -> Option<RecentSearch> {
        self.read_recent_searches()
            .into_iter()
            .find(|entry| entry.canonical_key == canonical_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    fn cache() -> RecipeCache<MemoryStore> {
        RecipeCache::new(MemoryStore::new())
    }

    #[test]
    fn test_reads_default_when_empty() {
        let cache = cache();
        assert_eq!(cache.read_last_search(), None);
        assert!(cache.read_last_results().is_empty());
        assert!(cache.read_last_suggestions().is_empty());
        assert!(cache.read_recipes_by_id().is_empty());
        assert!(cache.read_recent_searches().is_empty());
        assert_eq!(cache.most_recent_search(), None);
    }

    #[test]
    fn test_reads_default_when_malformed() {
        let cache = cache();
        for key in [
            storage_keys::LAST_SEARCH_STATE,
            storage_keys::LAST_RESULTS,
            storage_keys::LAST_SUGGESTIONS,
            storage_keys::RECIPES_BY_ID,
            storage_keys::RECENT_SEARCHES,
        ] {
            cache.store().set_item(key, "{not json").unwrap();
        }
        assert_eq!(cache.read_last_search(), None);
        assert!(cache.read_last_results().is_empty());
        assert!(cache.read_recipes_by_id().is_empty());
        assert!(cache.read_recent_searches().is_empty());

        // Valid JSON of the wrong shape is malformed too
        cache
            .store()
            .set_item(storage_keys::RECENT_SEARCHES, r#"{"a": 1}"#)
            .unwrap();
        assert!(cache.read_recent_searches().is_empty());
    }

    #[test]
    fn test_last_search_round_trip() {
        let cache = cache();
        let query = SearchQuery::new("stew", "beef");
        cache.write_last_search(&query);
        assert_eq!(cache.read_last_search(), Some(query));
    }

    #[test]
    fn test_writes_overwrite() {
        let cache = cache();
        cache.write_last_results(&[Recipe::new(1, "a"), Recipe::new(2, "b")]);
        cache.write_last_results(&[Recipe::new(3, "c")]);
        assert_eq!(cache.read_last_results(), vec![Recipe::new(3, "c")]);
    }

    #[test]
    fn test_merge_is_monotone() {
        let cache = cache();
        cache.merge_recipes_by_id(&[Recipe::new(1, "one"), Recipe::new(2, "two")]);
        cache.merge_recipes_by_id(&[Recipe::new(2, "two v2"), Recipe::new(3, "three")]);

        let index = cache.read_recipes_by_id();
        assert_eq!(index.len(), 3);
        assert_eq!(index[&1], Recipe::new(1, "one"));
        assert_eq!(index[&2].title, "two v2");
        assert_eq!(index[&3].title, "three");
    }

    #[test]
    fn test_index_keys_are_decimal_strings() {
        let cache = cache();
        cache.merge_recipes_by_id(&[Recipe::new(715538, "stew")]);
        let raw = cache.store().get_item(storage_keys::RECIPES_BY_ID).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["715538"]["title"], "stew");
    }

    #[test]
    fn test_recent_newest_first_and_deduped() {
        let cache = cache();
        cache.append_recent_search_at(&SearchQuery::new("stew", "beef"), 1);
        cache.append_recent_search_at(&SearchQuery::new("pie", ""), 2);
        cache.append_recent_search_at(&SearchQuery::new("Stew ", " BEEF"), 3);

        let list = cache.read_recent_searches();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].canonical_key, "stew|beef");
        assert_eq!(list[0].timestamp, 3);
        assert_eq!(list[1].canonical_key, "pie|");
    }

    #[test]
    fn test_repeated_search_collapses_to_one_entry() {
        let cache = cache();
        let query = SearchQuery::new("stew", "beef");
        cache.append_recent_search_at(&query, 100);
        cache.append_recent_search_at(&query, 200);

        let list = cache.read_recent_searches();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].canonical_key, "stew|beef");
        assert_eq!(list[0].timestamp, 200);
    }

    #[test]
    fn test_recent_bounded() {
        let cache = cache();
        for i in 0..25u64 {
            cache.append_recent_search_at(&SearchQuery::new(format!("q{}", i), ""), i);
            assert!(cache.read_recent_searches().len() <= MAX_RECENT_SEARCHES);
        }
        let list = cache.read_recent_searches();
        assert_eq!(list.len(), MAX_RECENT_SEARCHES);
        assert_eq!(list[0].text, "q24");
        assert_eq!(list[9].text, "q15");
    }

    #[test]
    fn test_find_recent() {
        let cache = cache();
        cache.append_recent_search_at(&SearchQuery::new("Stew", "Beef"), 1);
        let entry = cache.find_recent("stew|beef").unwrap();
        assert_eq!(entry.query(), SearchQuery::new("Stew", "Beef"));
        assert_eq!(cache.find_recent("nope|"), None);
    }

    #[test]
    fn test_append_uses_clock() {
        let cache = cache();
        cache.append_recent_search(&SearchQuery::new("soup", ""));
        assert!(cache.most_recent_search().unwrap().timestamp > 0);
    }
}
