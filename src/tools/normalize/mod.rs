//! Convergence point for every tier: a loosely filled [`RecipeDraft`] becomes a
//! canonical [`ExtractedRecipe`].

#[cfg(test)]
mod tests;

use url::Url;

use crate::tools::clean::{clean, clean_all};
use crate::types::{ExtractedIngredient, ExtractedRecipe, ExtractedStep, RawPage};

/// Raw field values gathered by a tier, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub servings: Option<u32>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub total_time_minutes: Option<u32>,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeDraft {
    /// Clean and shape the draft. `None` when no usable title remains.
    ///
    /// Acceptance (content thresholds) is the caller's concern; this only
    /// guarantees the structural invariants: non-empty texts, contiguous step
    /// order, absolute image URL.
    pub fn build(self, page: &RawPage) -> Option<ExtractedRecipe> {
        let title = clean(self.title.as_deref().unwrap_or_default());
        if title.is_empty() {
            return None;
        }

        let ingredients = clean_all(&self.ingredients[..])
            .into_iter()
            .map(|text| ExtractedIngredient { text })
            .collect();
        let steps = clean_all(&self.steps[..])
            .into_iter()
            .enumerate()
            .map(|(order, text)| ExtractedStep { text, order })
            .collect();

        let (prep, mut cook, total) = (
            self.prep_time_minutes,
            self.cook_time_minutes,
            self.total_time_minutes,
        );
        if prep.is_none() && cook.is_none() {
            cook = total;
        }

        Some(ExtractedRecipe {
            title,
            description: clean(self.description.as_deref().unwrap_or_default()),
            servings: self.servings.filter(|n| *n > 0),
            prep_time_minutes: prep,
            cook_time_minutes: cook,
            total_time_minutes: total,
            image_url: self
                .image_url
                .as_deref()
                .and_then(|raw| resolve_url(raw, &page.final_url)),
            ingredients,
            steps,
            source_url: page.final_url.clone(),
        })
    }
}

/// Resolve a possibly relative URL against `base`.
///
/// Empty values and inline `data:` URIs yield `None`.
pub fn resolve_url(raw: &str, base: &str) -> Option<String> {
    let raw = raw.trim();
    let inline = raw.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:"));
    if raw.is_empty() || inline {
        return None;
    }
    if let Ok(abs) = Url::parse(raw) {
        return matches!(abs.scheme(), "http" | "https").then(|| abs.to_string());
    }
    Url::parse(base)
        .ok()?
        .join(raw)
        .ok()
        .map(|u| u.to_string())
}
