//! Tier 3: Schema.org Recipe annotated with Microdata (`itemscope`/`itemprop`)
//! or RDFa (`typeof`/`property`).

mod utils;

#[cfg(test)]
mod tests;

use scraper::{ElementRef, Html};

use crate::config::ExtractConfig;
use crate::dom::{element_lines, element_text, meta_content};
use crate::selectors::{sel, LI_SELECTOR, P_SELECTOR};
use crate::tools::clean::clean_lines;
use crate::tools::normalize::RecipeDraft;
use crate::tools::parse::{parse_iso_duration, parse_servings, parse_text_duration};
use crate::types::{ExtractedRecipe, RawPage};

use utils::{item_props, recipe_roots, ItemProps};

/// Extract a recipe from Microdata/RDFa annotations.
pub fn try_microdata(page: &RawPage) -> Option<ExtractedRecipe> {
    let doc = Html::parse_document(&page.html);
    microdata_in(&doc, page, &ExtractConfig::default())
}

pub(crate) fn microdata_in(
    doc: &Html,
    page: &RawPage,
    cfg: &ExtractConfig,
) -> Option<ExtractedRecipe> {
    for root in recipe_roots(doc) {
        let props = item_props(root);
        let mut draft = draft_from_props(&props);
        if draft.image_url.is_none() {
            draft.image_url = meta_content(doc, &["og:image"]);
        }
        let Some(recipe) = draft.build(page) else {
            continue;
        };
        if cfg.acceptance.accepts(&recipe) {
            return Some(recipe);
        }
        tracing::debug!(title = %recipe.title, "microdata recipe too thin");
    }
    None
}

fn draft_from_props(props: &ItemProps<'_>) -> RecipeDraft {
    let text = |name: &str| props.first(name).map(utils::text_value);

    let mut ingredients: Vec<String> = props
        .all("recipeIngredient")
        .map(utils::text_value)
        .collect();
    if ingredients.is_empty() {
        ingredients = props.all("ingredients").map(utils::text_value).collect();
    }

    RecipeDraft {
        title: text("name"),
        description: text("description"),
        servings: text("recipeYield").as_deref().and_then(parse_servings),
        prep_time_minutes: props.first("prepTime").and_then(duration_of),
        cook_time_minutes: props.first("cookTime").and_then(duration_of),
        total_time_minutes: props.first("totalTime").and_then(duration_of),
        image_url: props.first("image").and_then(utils::url_value),
        ingredients,
        steps: instruction_texts(&props.all("recipeInstructions").collect::<Vec<_>>()),
    }
}

/// Machine-readable `content`/`datetime` must be ISO 8601 (or bare minutes);
/// visible text may be prose like "1 hour 10 mins".
fn duration_of(el: ElementRef<'_>) -> Option<u32> {
    let v = el.value();
    match v.attr("content").or_else(|| v.attr("datetime")) {
        Some(machine) => parse_iso_duration(machine),
        None => parse_text_duration(&element_text(el)),
    }
}

fn instruction_texts(elements: &[ElementRef<'_>]) -> Vec<String> {
    match elements {
        [] => Vec::new(),
        [container] => container_steps(*container),
        many => many.iter().map(|el| step_text(*el)).collect(),
    }
}

/// One `recipeInstructions` element holding every step.
fn container_steps(container: ElementRef<'_>) -> Vec<String> {
    let nested = [
        sel(r#"[itemprop~="text"]"#),
        sel(r#"[itemtype*="HowToStep"]"#),
    ];
    for selector in nested.iter().flatten() {
        let found: Vec<String> = container.select(selector).map(element_text).collect();
        if !found.is_empty() {
            return found;
        }
    }

    let items: Vec<String> = container.select(&LI_SELECTOR).map(element_text).collect();
    if !items.is_empty() {
        return items;
    }
    let paragraphs: Vec<String> = container.select(&P_SELECTOR).map(element_text).collect();
    if paragraphs.len() > 1 {
        return paragraphs;
    }
    match container.value().attr("content") {
        Some(content) => clean_lines(content),
        None => clean_lines(&element_lines(container)),
    }
}

/// A single step element, possibly a `HowToStep` scope with its own `text`.
fn step_text(el: ElementRef<'_>) -> String {
    sel(r#"[itemprop~="text"]"#)
        .and_then(|s| el.select(&s).next())
        .map(element_text)
        .unwrap_or_else(|| utils::text_value(el))
}
