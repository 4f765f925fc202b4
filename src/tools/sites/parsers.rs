//! Markup-family parsers. Each reads only the DOM and fills a draft; empty
//! drafts are rejected downstream.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::utils::{first, first_text, first_texts, image, leading_number, step_text, texts};
use crate::dom::{element_lines, element_text, meta_content};
use crate::selectors::{sel, LI_SELECTOR, TIME_SELECTOR};
use crate::tools::clean::clean_lines;
use crate::tools::normalize::RecipeDraft;
use crate::tools::parse::{parse_iso_duration, parse_servings, parse_text_duration};

static DETAIL_LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[class*='__label']").expect("valid label selector"));

static DETAIL_VALUE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[class*='__value'], [class*='meta-text__data']").expect("valid value selector")
});

/// Dotdash Meredith (Allrecipes, Serious Eats, Simply Recipes, ...).
pub(super) fn dotdash(doc: &Html) -> RecipeDraft {
    let mut draft = RecipeDraft {
        title: first_text(doc, &["h1.article-heading", "h1.headline", "h1"]),
        description: first_text(doc, &["p.article-subheading", "p.heading__subtitle"])
            .or_else(|| meta_content(doc, &["description"])),
        image_url: meta_content(doc, &["og:image"]),
        ingredients: first_texts(
            doc,
            &[
                ".mm-recipes-structured-ingredients__list-item",
                ".mntl-structured-ingredients__list-item",
                ".structured-ingredients__list-item",
                ".ingredient-list li",
            ],
        ),
        ..Default::default()
    };

    for css in [
        ".mm-recipes-steps__content ol > li",
        ".recipe__steps-content ol > li",
        ".mntl-sc-block-group--OL > li",
    ] {
        if let Some(s) = sel(css) {
            let steps: Vec<String> = doc.select(&s).map(step_text).collect();
            if !steps.is_empty() {
                draft.steps = steps;
                break;
            }
        }
    }

    // "Prep Time: 15 mins" rows
    let rows = sel(".mm-recipes-details__item, .mntl-recipe-details__item, .project-meta__times-container > div");
    for row in rows.iter().flat_map(|s| doc.select(s)) {
        let label = row
            .select(&DETAIL_LABEL_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_default()
            .to_ascii_lowercase();
        let value = row
            .select(&DETAIL_VALUE_SELECTOR)
            .next()
            .map(element_text)
            .unwrap_or_default();
        apply_labelled(&mut draft, &label, &value);
    }
    draft
}

/// WP Recipe Maker plugin card.
pub(super) fn wprm(doc: &Html) -> RecipeDraft {
    let time = |key: &str| {
        let hours = first_text(doc, &[format!(".wprm-recipe-{key}_time-hours").as_str()])
            .and_then(|t| leading_number(&t));
        let minutes = first_text(doc, &[format!(".wprm-recipe-{key}_time-minutes").as_str()])
            .and_then(|t| leading_number(&t));
        match (hours, minutes) {
            (None, None) => None,
            (h, m) => Some(h.unwrap_or(0) * 60 + m.unwrap_or(0)).filter(|t| *t > 0),
        }
    };

    RecipeDraft {
        title: first_text(doc, &[".wprm-recipe-name", "h1.entry-title", "h1"]),
        description: first_text(doc, &[".wprm-recipe-summary"]),
        servings: first(doc, ".wprm-recipe-servings")
            .and_then(|el| {
                el.value()
                    .attr("data-recipe-servings")
                    .and_then(parse_servings)
                    .or_else(|| parse_servings(&element_text(el)))
            }),
        prep_time_minutes: time("prep"),
        cook_time_minutes: time("cook"),
        total_time_minutes: time("total"),
        image_url: image(doc, ".wprm-recipe-image img"),
        ingredients: texts(doc, ".wprm-recipe-ingredient"),
        steps: first_texts(doc, &[".wprm-recipe-instruction-text", ".wprm-recipe-instruction"]),
    }
}

/// Tasty Recipes plugin card.
pub(super) fn tasty(doc: &Html) -> RecipeDraft {
    let duration = |css: &str| first_text(doc, &[css]).and_then(|t| parse_text_duration(&t));

    RecipeDraft {
        title: first_text(doc, &[".tasty-recipes-title", "h1"]),
        description: first_text(doc, &[".tasty-recipes-description"]),
        servings: first_text(doc, &[".tasty-recipes-yield"]).and_then(|t| parse_servings(&t)),
        prep_time_minutes: duration(".tasty-recipes-prep-time"),
        cook_time_minutes: duration(".tasty-recipes-cook-time"),
        total_time_minutes: duration(".tasty-recipes-total-time"),
        image_url: image(doc, ".tasty-recipes-image img"),
        ingredients: texts(doc, ".tasty-recipes-ingredients li"),
        steps: first_texts(
            doc,
            &[".tasty-recipes-instructions li", ".tasty-recipes-instructions p"],
        ),
    }
}

/// BBC Good Food recipe pages.
pub(super) fn bbc_good_food(doc: &Html) -> RecipeDraft {
    let mut draft = RecipeDraft {
        title: first_text(doc, &["h1.heading-1", "h1"]),
        description: meta_content(doc, &["description", "og:description"]),
        servings: first_text(doc, &[".post-header__servings", ".recipe__servings"])
            .and_then(|t| parse_servings(&t)),
        image_url: meta_content(doc, &["og:image"]),
        ingredients: texts(doc, ".recipe__ingredients li"),
        ..Default::default()
    };

    if let Some(s) = sel(".recipe__method-steps li") {
        draft.steps = doc.select(&s).map(step_text).collect();
    }

    // <li>Prep: <time datetime="PT15M">15 mins</time></li>
    let rows = sel(".recipe__cook-and-prep li, .cook-and-prep-time li");
    for row in rows.iter().flat_map(|s| doc.select(s)) {
        let label = element_text(row).to_ascii_lowercase();
        let minutes = row
            .select(&TIME_SELECTOR)
            .next()
            .and_then(|t| {
                t.value()
                    .attr("datetime")
                    .and_then(parse_iso_duration)
                    .or_else(|| parse_text_duration(&element_text(t)))
            })
            .or_else(|| parse_text_duration(&label));
        if label.contains("prep") {
            draft.prep_time_minutes = draft.prep_time_minutes.or(minutes);
        } else if label.contains("cook") {
            draft.cook_time_minutes = draft.cook_time_minutes.or(minutes);
        } else if label.contains("total") {
            draft.total_time_minutes = draft.total_time_minutes.or(minutes);
        }
    }
    draft
}

/// WordPress.com Jetpack recipe shortcode.
pub(super) fn jetpack(doc: &Html) -> RecipeDraft {
    let duration = |css: &str| {
        first(doc, css).and_then(|el| {
            el.select(&TIME_SELECTOR)
                .next()
                .and_then(|t| t.value().attr("datetime"))
                .and_then(parse_iso_duration)
                .or_else(|| parse_text_duration(&element_text(el)))
        })
    };

    let steps = match first(doc, ".jetpack-recipe-directions") {
        Some(el) => {
            let items: Vec<String> = el.select(&LI_SELECTOR).map(element_text).collect();
            if items.is_empty() {
                clean_lines(&element_lines(el))
            } else {
                items
            }
        }
        None => Vec::new(),
    };

    RecipeDraft {
        title: first_text(doc, &[".jetpack-recipe-title", "h1.entry-title", "h1"]),
        description: first_text(doc, &[".jetpack-recipe-notes"]),
        servings: first_text(doc, &[".jetpack-recipe-servings"]).and_then(|t| parse_servings(&t)),
        prep_time_minutes: duration(".jetpack-recipe-prep-time"),
        cook_time_minutes: duration(".jetpack-recipe-cook-time"),
        total_time_minutes: duration(".jetpack-recipe-time"),
        image_url: image(doc, ".jetpack-recipe-image"),
        ingredients: texts(doc, ".jetpack-recipe-ingredients li"),
        steps,
    }
}

/// Fill a time/yield field from a "label: value" detail row.
fn apply_labelled(draft: &mut RecipeDraft, label: &str, value: &str) {
    let label = label.trim_end_matches(':').trim();
    match label {
        "prep time" | "prep" => draft.prep_time_minutes = parse_text_duration(value),
        "cook time" | "cook" => draft.cook_time_minutes = parse_text_duration(value),
        "total time" | "total" => draft.total_time_minutes = parse_text_duration(value),
        "servings" | "serves" => draft.servings = parse_servings(value),
        "yield" if draft.servings.is_none() => draft.servings = parse_servings(value),
        _ => {}
    }
}
