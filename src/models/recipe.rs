//! Canonical recipe record and the upstream normalizer.
//!
//! The upstream service returns slightly different shapes from its search and
//! random endpoints. Both are funneled through [`normalize_recipe`] so the
//! rest of the application only ever sees [`Recipe`].
//!
//! Upstream names are accepted as serde aliases next to the canonical names,
//! which makes normalization idempotent: a serialized `Recipe` normalizes to
//! itself.
//!
//! Only `id` is strict. Every other field goes through [`lenient`], so a null
//! or mistyped value becomes absent (or empty) instead of losing the record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserialize `T`, falling back to its default on `null` or a type mismatch.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A recipe as stored, cached and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, alias = "sourceUrl", deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub aggregate_likes: Option<i64>,
    #[serde(
        default,
        alias = "analyzedInstructions",
        deserialize_with = "lenient"
    )]
    pub instruction_sets: Vec<InstructionSet>,
    #[serde(default, deserialize_with = "lenient")]
    pub cheap: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub cooking_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ready_in_minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub credits_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub diets: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub servings: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price_per_serving: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cuisines: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dish_types: Vec<String>,
}

/// A named group of instruction steps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstructionSet {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub steps: Vec<Step>,
}

/// One instruction step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient")]
    pub number: Option<u32>,
    #[serde(default, alias = "step", deserialize_with = "lenient")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient")]
    pub ingredients: Vec<StepItem>,
    #[serde(default, deserialize_with = "lenient")]
    pub equipment: Vec<StepItem>,
}

/// Ingredient or piece of equipment referenced by a step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepItem {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub localized_name: Option<String>,
}

impl Recipe {
    /// Minimal record, mostly useful in tests.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: None,
            url: None,
            aggregate_likes: None,
            instruction_sets: Vec::new(),
            cheap: None,
            cooking_minutes: None,
            ready_in_minutes: None,
            credits_text: None,
            diets: Vec::new(),
            servings: None,
            summary: None,
            price_per_serving: None,
            cuisines: Vec::new(),
            dish_types: Vec::new(),
        }
    }

    /// Steps of the first instruction group, if any.
    pub fn primary_steps(&self) -> &[Step] {
        self.instruction_sets
            .first()
            .map(|set| set.steps.as_slice())
            .unwrap_or(&[])
    }
}

/// Map one upstream record onto the canonical shape.
///
/// Returns `None` only when the record is not an object or has no usable
/// numeric `id`; such records cannot be cached or navigated to.
pub fn normalize_recipe(raw: &Value) -> Option<Recipe> {
    Recipe::deserialize(raw).ok()
}

/// Normalize the array found under `field` in an upstream response.
///
/// A missing or non-array field yields an empty list. Records that fail to
/// normalize are dropped and reported through `on_dropped`.
pub fn normalize_list(
    response: &Value,
    field: &str,
    mut on_dropped: impl FnMut(&Value),
) -> Vec<Recipe> {
    let Some(items) = response.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|raw| {
            let recipe = normalize_recipe(raw);
            if recipe.is_none() {
                on_dropped(raw);
            }
            recipe
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream() -> Value {
        json!({
            "id": 715538,
            "title": "Beef Stew",
            "image": "https://img.test/715538.jpg",
            "sourceUrl": "https://blog.test/stew",
            "aggregateLikes": 42,
            "analyzedInstructions": [{
                "name": "",
                "steps": [{
                    "number": 1,
                    "step": "Brown the beef.",
                    "ingredients": [{"id": 23572, "name": "beef", "localizedName": "beef", "image": "beef.png"}],
                    "equipment": [{"id": 404645, "name": "frying pan", "localizedName": "frying pan", "image": "pan.png"}]
                }]
            }],
            "cheap": false,
            "cookingMinutes": 90,
            "readyInMinutes": 120,
            "creditsText": "Test Kitchen",
            "diets": ["gluten free"],
            "servings": 4,
            "summary": "A <b>hearty</b> stew.",
            "pricePerServing": 312.5,
            "cuisines": [],
            "dishTypes": ["main course"],
            "vegan": false
        })
    }

    #[test]
    fn test_normalize_renames_fields() {
        let recipe = normalize_recipe(&upstream()).unwrap();
        assert_eq!(recipe.id, 715538);
        assert_eq!(recipe.url.as_deref(), Some("https://blog.test/stew"));
        assert_eq!(recipe.cooking_minutes, Some(90));
        assert_eq!(recipe.ready_in_minutes, Some(120));
        assert_eq!(recipe.primary_steps()[0].text, "Brown the beef.");
        assert_eq!(recipe.primary_steps()[0].ingredients[0].id, Some(23572));
        assert_eq!(recipe.dish_types, vec!["main course".to_string()]);
    }

    #[test]
    fn test_normalize_tolerates_missing_optionals() {
        let recipe = normalize_recipe(&json!({"id": 7, "title": "Toast"})).unwrap();
        assert_eq!(recipe, Recipe::new(7, "Toast"));
    }

    #[test]
    fn test_normalize_treats_null_sequences_as_empty() {
        let recipe = normalize_recipe(&json!({
            "id": 8,
            "title": null,
            "diets": null,
            "analyzedInstructions": null
        }))
        .unwrap();
        assert!(recipe.title.is_empty());
        assert!(recipe.diets.is_empty());
        assert!(recipe.instruction_sets.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_recipe(&upstream()).unwrap();
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize_recipe(&serialized).unwrap();
        assert_eq!(once, twice);
        assert!(serialized.get("url").is_some());
        assert!(serialized.get("sourceUrl").is_none());
        assert!(serialized.get("instructionSets").is_some());
    }

    #[test]
    fn test_normalize_rejects_missing_id() {
        assert_eq!(normalize_recipe(&json!({"title": "No id"})), None);
        assert_eq!(normalize_recipe(&json!({"id": "abc"})), None);
    }

    #[test]
    fn test_normalize_keeps_records_with_mistyped_fields() {
        let recipe = normalize_recipe(&json!({
            "id": 5,
            "title": "Soup",
            "servings": "4",
            "readyInMinutes": 45.5,
            "diets": "vegan",
            "analyzedInstructions": [{
                "name": 3,
                "steps": [{"number": "one", "step": "Simmer.", "ingredients": {"id": 1}}]
            }]
        }))
        .unwrap();
        assert_eq!(recipe.id, 5);
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.ready_in_minutes, None);
        assert!(recipe.diets.is_empty());
        assert_eq!(recipe.primary_steps()[0].text, "Simmer.");
        assert_eq!(recipe.primary_steps()[0].number, None);
        assert!(recipe.primary_steps()[0].ingredients.is_empty());
    }

    #[test]
    fn test_normalize_list_drops_bad_records() {
        let response = json!({"results": [upstream(), {"title": "orphan"}]});
        let mut dropped = 0;
        let recipes = normalize_list(&response, "results", |_| dropped += 1);
        assert_eq!(recipes.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_normalize_list_missing_field() {
        assert!(normalize_list(&json!({}), "results", |_| {}).is_empty());
        assert!(normalize_list(&json!({"results": null}), "results", |_| {}).is_empty());
    }
}
