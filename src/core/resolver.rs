//! Detail-view lookup.
//!
//! The detail page never calls the network: a recipe is looked up in the
//! id index, then the last results, then the last suggestions.

use crate::core::cache::RecipeCache;
use crate::core::error::ResolveError;
use crate::models::Recipe;
use crate::utils::storage::KeyValueStore;

/// Resolve the raw `id` query parameter to a cached recipe.
///
/// A blank id is [`ResolveError::MissingId`]; an id that is not a number or
/// is in none of the stores is [`ResolveError::NotFound`].
pub fn resolve_recipe<S: KeyValueStore>(
    cache: &RecipeCache<S>,
    id: &str,
) -> Result<Recipe, ResolveError> {
    let raw = id.trim();
    if raw.is_empty() {
        return Err(ResolveError::MissingId);
    }
    let not_found = || ResolveError::NotFound(raw.to_string());
    let id: u64 = raw.parse().map_err(|_| not_found())?;

    if let Some(recipe) = cache.read_recipes_by_id().remove(&id) {
        return Ok(recipe);
    }

    cache
        .read_last_results()
        .into_iter()
        .find(|recipe| recipe.id == id)
        .or_else(|| {
            cache
                .read_last_suggestions()
                .into_iter()
                .find(|recipe| recipe.id == id)
        })
        .ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{messages, storage_keys};
    use crate::utils::storage::MemoryStore;

    fn cache() -> RecipeCache<MemoryStore> {
        RecipeCache::new(MemoryStore::new())
    }

    #[test]
    fn test_index_wins() {
        let cache = cache();
        cache.merge_recipes_by_id(&[Recipe::new(1, "from index")]);
        cache.write_last_results(&[Recipe::new(1, "from results")]);
        cache.write_last_suggestions(&[Recipe::new(1, "from suggestions")]);
        assert_eq!(resolve_recipe(&cache, "1").unwrap().title, "from index");
    }

    #[test]
    fn test_results_before_suggestions() {
        let cache = cache();
        cache.write_last_results(&[Recipe::new(2, "from results")]);
        cache.write_last_suggestions(&[Recipe::new(2, "from suggestions")]);
        assert_eq!(resolve_recipe(&cache, "2").unwrap().title, "from results");
    }

    #[test]
    fn test_suggestions_only() {
        let cache = cache();
        cache.write_last_results(&[Recipe::new(3, "other")]);
        cache.write_last_suggestions(&[Recipe::new(4, "suggested")]);
        assert_eq!(
            resolve_recipe(&cache, " 4 ").unwrap(),
            Recipe::new(4, "suggested")
        );
    }

    #[test]
    fn test_not_found() {
        let cache = cache();
        cache.write_last_results(&[Recipe::new(3, "other")]);
        let err = resolve_recipe(&cache, "99").unwrap_err();
        assert_eq!(err, ResolveError::NotFound("99".to_string()));
        assert_eq!(err.to_string(), messages::RECIPE_NOT_CACHED);
        assert!(matches!(
            resolve_recipe(&cache, "abc"),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_id() {
        assert_eq!(
            resolve_recipe(&cache(), "  ").unwrap_err(),
            ResolveError::MissingId
        );
    }

    #[test]
    fn test_corrupt_index_falls_through() {
        let cache = cache();
        cache
            .store()
            .set_item(storage_keys::RECIPES_BY_ID, "garbage")
            .unwrap();
        cache.write_last_suggestions(&[Recipe::new(5, "still here")]);
        assert_eq!(resolve_recipe(&cache, "5").unwrap().title, "still here");
    }
}
