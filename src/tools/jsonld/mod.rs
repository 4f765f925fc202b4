//! Tier 2: Schema.org `Recipe` objects embedded as JSON-LD.

mod fields;
mod utils;


use scraper::Html;
use serde_json::Value;

use crate::config::ExtractConfig;
use crate::dom::meta_content;
use crate::selectors::TYPED_SCRIPT_SELECTOR;
use crate::tools::normalize::RecipeDraft;
use crate::types::{ExtractedRecipe, RawPage};

pub use utils::sanitize_json;

/// Extract a recipe from the page's `<script type="application/ld+json">` blocks.
///
/// Malformed blocks are skipped. The first `Recipe` object that passes the
/// acceptance policy wins; a name-only object falls through.
///
/// # Examples
/// ```
/// use recipe_scrape::tools::jsonld::try_json_ld;
/// use recipe_scrape::RawPage;
///
/// let html = r#"<script type="application/ld+json">
///   {"@type": "Recipe", "name": "Toast", "recipeIngredient": ["1 slice bread"]}
/// </script>"#;
/// let recipe = try_json_ld(&RawPage::from_html("https://example.com/toast", html)).unwrap();
/// assert_eq!(recipe.title, "Toast");
/// ```
pub fn try_json_ld(page: &RawPage) -> Option<ExtractedRecipe> {
    let doc = Html::parse_document(&page.html);
    json_ld_in(&doc, page, &ExtractConfig::default())
}

pub(crate) fn json_ld_in(
    doc: &Html,
    page: &RawPage,
    cfg: &ExtractConfig,
) -> Option<ExtractedRecipe> {
    let limits = &cfg.limits;

    for (idx, script) in doc
        .select(&TYPED_SCRIPT_SELECTOR)
        .filter(|el| el.value().attr("type").is_some_and(utils::is_json_ld_type))
        .enumerate()
    {
        let raw: String = script.text().collect();
        if raw.len() > limits.max_jsonld_bytes {
            tracing::debug!(block = idx, bytes = raw.len(), "skipping oversized JSON-LD block");
            continue;
        }

        let value: Value = match serde_json::from_str(&sanitize_json(&raw)) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(block = idx, error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        for node in utils::recipe_nodes(&value, limits.max_jsonld_depth) {
            let mut draft = draft_from_node(node, limits.max_jsonld_depth);
            if draft.image_url.is_none() {
                draft.image_url = meta_content(doc, &["og:image"]);
            }
            let Some(recipe) = draft.build(page) else {
                continue;
            };
            if cfg.acceptance.accepts(&recipe) {
                return Some(recipe);
            }
            tracing::debug!(block = idx, title = %recipe.title, "JSON-LD recipe too thin");
        }
    }
    None
}

/// Map one `Recipe` object onto a draft.
fn draft_from_node(node: &Value, max_depth: usize) -> RecipeDraft {
    let field = |key: &str| node.get(key);

    RecipeDraft {
        title: field("name").and_then(fields::text_value),
        description: field("description").and_then(fields::text_value),
        servings: field("recipeYield")
            .or_else(|| field("yield"))
            .and_then(fields::servings_value),
        prep_time_minutes: field("prepTime").and_then(fields::duration_value),
        cook_time_minutes: field("cookTime").and_then(fields::duration_value),
        total_time_minutes: field("totalTime").and_then(fields::duration_value),
        image_url: field("image").and_then(fields::image_value),
        ingredients: field("recipeIngredient")
            .or_else(|| field("ingredients"))
            .map(fields::ingredient_values)
            .unwrap_or_default(),
        steps: field("recipeInstructions")
            .map(|v| fields::instruction_values(v, max_depth))
            .unwrap_or_default(),
    }
}
