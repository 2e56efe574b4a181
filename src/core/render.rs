//! Recipe markup rendering.
//!
//! Everything that originates upstream is escaped before it lands in the
//! generated HTML. Card grids come back paired with navigation commands;
//! the caller decides when to run them.

use std::collections::HashSet;

use crate::config::{FALLBACK_IMAGE, messages};
use crate::models::{AppRoute, Recipe, Step, StepItem};
use crate::utils::{UrlValidation, validate_link_url};

// =============================================================================
// Escaping
// =============================================================================

/// Escape `&`, `<`, `>` and `"` for element content.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// [`escape_html`] plus `'`, for attribute values.
pub fn escape_attr(input: &str) -> String {
    escape_html(input).replace('\'', "&#39;")
}

/// Drop all markup from an upstream HTML fragment, keeping escaped text.
///
/// `<script>` and `<style>` contents are removed along with the tags. The
/// serializer leaves `"` alone in text nodes, so it is escaped here to match
/// [`escape_html`].
pub fn strip_tags(html: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(html)
        .to_string()
        .replace('"', "&quot;")
}

// =============================================================================
// Cards
// =============================================================================

/// One rendered card and the route to open when it is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub id: u64,
    pub html: String,
    pub navigate: AppRoute,
}

/// Rendered card grid.
#[derive(Debug, Clone, PartialEq)]
pub enum CardGrid {
    /// Placeholder markup shown instead of an empty grid.
    Empty(String),
    Cards(Vec<RecipeCard>),
}

fn image_src(image: Option<&str>) -> &str {
    image
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .unwrap_or(FALLBACK_IMAGE)
}

fn card_html(recipe: &Recipe) -> String {
    format!(
        r#"<article class="card"><img class="card-media" src="{src}" alt="{alt}" referrerpolicy="no-referrer" loading="lazy" decoding="async" /><div class="card-body"><h3 class="card-title">{title}</h3></div></article>"#,
        src = escape_attr(image_src(recipe.image.as_deref())),
        alt = escape_attr(&recipe.title),
        title = escape_html(&recipe.title),
    )
}

/// Render a result or suggestion set.
pub fn render_cards(recipes: &[Recipe]) -> CardGrid {
    if recipes.is_empty() {
        return CardGrid::Empty(format!(
            r#"<p class="subtle">{}</p>"#,
            escape_html(messages::NO_RESULTS)
        ));
    }

    CardGrid::Cards(
        recipes
            .iter()
            .map(|recipe| RecipeCard {
                id: recipe.id,
                html: card_html(recipe),
                navigate: AppRoute::detail(recipe.id),
            })
            .collect(),
    )
}

// =============================================================================
// Detail
// =============================================================================

/// Instruction text plus ingredients and equipment, deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepData {
    pub instructions: Vec<String>,
    pub ingredients: Vec<StepItem>,
    pub equipment: Vec<StepItem>,
}

#[derive(Hash, PartialEq, Eq)]
enum ItemKey {
    Id(i64),
    Name(String),
}

fn item_key(item: &StepItem) -> Option<ItemKey> {
    if let Some(id) = item.id {
        return Some(ItemKey::Id(id));
    }
    let name = item.name.trim().to_lowercase();
    (!name.is_empty()).then_some(ItemKey::Name(name))
}

fn push_unique(seen: &mut HashSet<ItemKey>, out: &mut Vec<StepItem>, item: &StepItem) {
    let Some(key) = item_key(item) else {
        return;
    };
    if seen.insert(key) {
        out.push(item.clone());
    }
}

/// Flatten steps into instruction lines and first-seen-ordered unique
/// ingredients and equipment (keyed by id, or lower-cased name).
pub fn collect_step_data(steps: &[Step]) -> StepData {
    let mut data = StepData::default();
    let mut seen_ingredients = HashSet::new();
    let mut seen_equipment = HashSet::new();

    for step in steps {
        let text = step.text.trim();
        if !text.is_empty() {
            data.instructions.push(text.to_string());
        }
        for item in &step.ingredients {
            push_unique(&mut seen_ingredients, &mut data.ingredients, item);
        }
        for item in &step.equipment {
            push_unique(&mut seen_equipment, &mut data.equipment, item);
        }
    }

    data
}

/// `"45 min • 4 servings"`, either part omitted when unknown.
pub fn meta_line(recipe: &Recipe) -> String {
    let minutes = recipe.ready_in_minutes.map(|m| format!("{} min", m));
    let servings = recipe.servings.map(|s| format!("{} servings", s));
    [minutes, servings]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" • ")
}

fn list_html(tag: &str, class: &str, items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();
    format!(r#"<{tag} class="{class}">{items}</{tag}>"#)
}

fn section_html(heading: &str, body: String) -> String {
    format!(
        r#"<section class="recipe-section"><h2>{}</h2>{}</section>"#,
        escape_html(heading),
        body
    )
}

/// Render the full detail page body for one recipe.
pub fn render_detail(recipe: &Recipe) -> String {
    let title = if recipe.title.trim().is_empty() {
        "Recipe"
    } else {
        recipe.title.as_str()
    };

    let mut html = format!(
        r#"<h1 class="recipe-title">{title}</h1><img class="recipe-hero" src="{src}" alt="{alt}" referrerpolicy="no-referrer" loading="lazy" decoding="async" />"#,
        title = escape_html(title),
        src = escape_attr(image_src(recipe.image.as_deref())),
        alt = escape_attr(title),
    );

    let meta = meta_line(recipe);
    if !meta.is_empty() {
        html.push_str(&format!(r#"<p class="recipe-meta">{}</p>"#, escape_html(&meta)));
    }

    if let Some(credits) = recipe.credits_text.as_deref().filter(|c| !c.trim().is_empty()) {
        html.push_str(&format!(
            r#"<p class="recipe-credit">{}</p>"#,
            escape_html(credits)
        ));
    }

    if let Some(url) = recipe.url.as_deref()
        && let UrlValidation::Valid(url) = validate_link_url(url)
    {
        html.push_str(&format!(
            r#"<a class="recipe-source" href="{}" target="_blank" rel="noopener">View full recipe</a>"#,
            escape_attr(&url)
        ));
    }

    if let Some(summary) = recipe.summary.as_deref() {
        let text = strip_tags(summary);
        if !text.trim().is_empty() {
            html.push_str(&format!(r#"<p class="recipe-summary">{}</p>"#, text));
        }
    }

    let tags: Vec<String> = recipe
        .diets
        .iter()
        .chain(&recipe.cuisines)
        .chain(&recipe.dish_types)
        .filter(|tag| !tag.trim().is_empty())
        .cloned()
        .collect();
    if !tags.is_empty() {
        html.push_str(&list_html("ul", "recipe-tags", &tags));
    }

    let steps = collect_step_data(recipe.primary_steps());
    let names = |items: &[StepItem]| -> Vec<String> {
        items.iter().map(|item| item.name.clone()).collect()
    };

    if !steps.ingredients.is_empty() {
        html.push_str(&section_html(
            "Ingredients",
            list_html("ul", "recipe-ingredients", &names(&steps.ingredients)),
        ));
    }
    if !steps.equipment.is_empty() {
        html.push_str(&section_html(
            "Equipment",
            list_html("ul", "recipe-equipment", &names(&steps.equipment)),
        ));
    }
    if !steps.instructions.is_empty() {
        html.push_str(&section_html(
            "Instructions",
            list_html("ol", "recipe-instructions", &steps.instructions),
        ));
    }

    html
}
