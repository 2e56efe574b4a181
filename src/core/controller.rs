//! Search and suggestion orchestration.
//!
//! The [`Controller`] owns the HTTP client and the cache. Each action class
//! (search, suggestions) has its own [`ActionLock`]: a dispatch acquires it,
//! and the returned [`LockGuard`] releases it when dropped, whatever the
//! outcome. The UI observes the locks to disable the matching controls.

use std::cell::{Cell, RefCell};

use crate::config::{SEARCH_LIMIT, SUGGESTION_LIMIT};
use crate::core::api::{RecipeApi, Transport};
use crate::core::cache::RecipeCache;
use crate::core::error::{ActionError, ResolveError};
use crate::core::resolver;
use crate::models::{RecentSearch, Recipe, SearchQuery};
use crate::utils::storage::KeyValueStore;

// ============================================================================
// ActionLock
// ============================================================================

/// Single-flight flag for one action class.
#[derive(Default)]
pub struct ActionLock {
    held: Cell<bool>,
    observer: RefCell<Option<Box<dyn Fn(bool)>>>,
}

impl ActionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked with the new state on every change.
    pub fn observe(&self, observer: impl Fn(bool) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    /// Take the lock, or `None` if it is already held.
    pub fn try_acquire(&self) -> Option<LockGuard<'_>> {
        if self.held.replace(true) {
            return None;
        }
        self.notify(true);
        Some(LockGuard { lock: self })
    }

    fn release(&self) {
        self.held.set(false);
        self.notify(false);
    }

    fn notify(&self, held: bool) {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(held);
        }
    }
}

/// Releases its [`ActionLock`] on drop.
pub struct LockGuard<'a> {
    lock: &'a ActionLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct Controller<T, S> {
    api: RecipeApi<T>,
    cache: RecipeCache<S>,
    search_lock: ActionLock,
    suggestions_lock: ActionLock,
}

impl<T: Transport, S: KeyValueStore> Controller<T, S> {
    pub fn new(api: RecipeApi<T>, cache: RecipeCache<S>) -> Self {
        Self {
            api,
            cache,
            search_lock: ActionLock::new(),
            suggestions_lock: ActionLock::new(),
        }
    }

    pub fn api(&self) -> &RecipeApi<T> {
        &self.api
    }

    pub fn cache(&self) -> &RecipeCache<S> {
        &self.cache
    }

    pub fn search_lock(&self) -> &ActionLock {
        &self.search_lock
    }

    pub fn suggestions_lock(&self) -> &ActionLock {
        &self.suggestions_lock
    }

    /// Run a search and write the results through to the cache.
    ///
    /// Blank queries are rejected before the lock is taken. On failure the
    /// cache is left untouched.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Recipe>, ActionError> {
        let query = query.trimmed();
        if !query.is_submittable() {
            return Err(ActionError::Validation);
        }

        let _guard = self.search_lock.try_acquire().ok_or(ActionError::Busy)?;
        let recipes = self.api.search(&query, SEARCH_LIMIT).await?;

        self.cache.write_last_search(&query);
        self.cache.write_last_results(&recipes);
        self.cache.merge_recipes_by_id(&recipes);
        self.cache.append_recent_search(&query);

        Ok(recipes)
    }

    /// Fetch a fresh set of random suggestions and cache them.
    pub async fn refresh_suggestions(&self) -> Result<Vec<Recipe>, ActionError> {
        let _guard = self
            .suggestions_lock
            .try_acquire()
            .ok_or(ActionError::Busy)?;
        let recipes = self.api.random(SUGGESTION_LIMIT).await?;

        self.cache.write_last_suggestions(&recipes);
        self.cache.merge_recipes_by_id(&recipes);

        Ok(recipes)
    }

    /// Look up a recent search so the form can be re-populated. Does not search.
    pub fn recall_recent(&self, canonical_key: &str) -> Option<SearchQuery> {
        self.cache
            .find_recent(canonical_key)
            .map(|entry| entry.query())
    }

    pub fn recent_searches(&self) -> Vec<RecentSearch> {
        self.cache.read_recent_searches()
    }

    pub fn last_search(&self) -> Option<SearchQuery> {
        self.cache.read_last_search()
    }

    pub fn cached_results(&self) -> Vec<Recipe> {
        self.cache.read_last_results()
    }

    pub fn cached_suggestions(&self) -> Vec<Recipe> {
        self.cache.read_last_suggestions()
    }

    /// Resolve a recipe for the detail view from cache only.
    pub fn resolve(&self, id: &str) -> Result<Recipe, ResolveError> {
        resolver::resolve_recipe(&self.cache, id)
    }
}
