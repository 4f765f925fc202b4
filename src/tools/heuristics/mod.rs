//! Tier 4: best-effort inference from unannotated HTML.
//!
//! Ingredients come from the best-scoring list, steps from the content under
//! an "Instructions"-style heading (or the most step-like remaining list),
//! and times/yield from regexes over the visible text.

mod scoring;
mod utils;

#[cfg(test)]
mod tests;

use scraper::Html;

use crate::config::ExtractConfig;
use crate::dom::{element_text, meta_content};
use crate::selectors::{H1_SELECTOR, TITLE_SELECTOR};
use crate::tools::clean::clean;
use crate::tools::normalize::RecipeDraft;
use crate::types::{ExtractedRecipe, RawPage};

pub use scoring::{score_list, score_steps, INGREDIENT_THRESHOLD, STEP_THRESHOLD};

use utils::{candidate_lists, instruction_heading, largest_image, steps_after, text_facts, visible_text};

/// Heuristic extraction. `None` when no title can be found, or when neither
/// ingredients nor steps turn up.
///
/// # Examples
/// ```
/// use recipe_scrape::tools::heuristics::try_heuristics;
/// use recipe_scrape::RawPage;
///
/// let html = "<h1>Quick Salad</h1><ul><li>2 tomatoes</li><li>1 cucumber</li><li>3 tbsp olive oil</li></ul>";
/// let recipe = try_heuristics(&RawPage::from_html("https://example.com/salad", html)).unwrap();
/// assert_eq!(recipe.title, "Quick Salad");
/// assert_eq!(recipe.ingredients.len(), 3);
/// ```
pub fn try_heuristics(page: &RawPage) -> Option<ExtractedRecipe> {
    let doc = Html::parse_document(&page.html);
    heuristics_in(&doc, page, &ExtractConfig::default())
}

pub(crate) fn heuristics_in(
    doc: &Html,
    page: &RawPage,
    cfg: &ExtractConfig,
) -> Option<ExtractedRecipe> {
    let limits = &cfg.limits;
    let title = page_title(doc)?;

    let lists = candidate_lists(doc, limits);

    // Highest score wins; ties go to the earlier list.
    let mut ingredients_idx = None;
    let mut best = f64::MIN;
    for (idx, list) in lists.iter().enumerate() {
        let score = list.ingredient_score(score_list(&list.items));
        if score >= INGREDIENT_THRESHOLD && score > best {
            best = score;
            ingredients_idx = Some(idx);
        }
    }
    let ingredient_list = ingredients_idx.map(|idx| &lists[idx]);

    let mut steps = instruction_heading(doc)
        .map(|h| steps_after(h, ingredient_list.map(|l| l.el), limits.max_list_items))
        .unwrap_or_default();

    if steps.is_empty() {
        let mut best = f64::MIN;
        for (idx, list) in lists.iter().enumerate() {
            let score = score_steps(&list.items);
            if Some(idx) != ingredients_idx && score >= STEP_THRESHOLD && score > best {
                best = score;
                steps = list.items.clone();
            }
        }
    }

    let facts = text_facts(&visible_text(doc, limits.max_text_scan_bytes));
    tracing::debug!(
        lists = lists.len(),
        ingredient_list = ?ingredients_idx,
        steps = steps.len(),
        "heuristic scan"
    );

    let draft = RecipeDraft {
        title: Some(title),
        description: meta_content(doc, &["og:description", "description"]),
        servings: facts.servings,
        prep_time_minutes: facts.prep,
        cook_time_minutes: facts.cook,
        total_time_minutes: facts.total,
        image_url: meta_content(doc, &["og:image"])
            .or_else(|| largest_image(doc, limits.max_images_scanned)),
        ingredients: ingredient_list.map(|l| l.items.clone()).unwrap_or_default(),
        steps,
    };

    let recipe = draft.build(page)?;
    cfg.acceptance.accepts(&recipe).then_some(recipe)
}

/// First non-empty `<h1>`, else `<title>`.
fn page_title(doc: &Html) -> Option<String> {
    doc.select(&H1_SELECTOR)
        .map(|h| clean(&element_text(h)))
        .find(|t| !t.is_empty())
        .or_else(|| {
            doc.select(&TITLE_SELECTOR)
                .map(|t| clean(&element_text(t)))
                .find(|t| !t.is_empty())
        })
}
