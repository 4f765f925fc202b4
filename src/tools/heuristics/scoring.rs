//! Pure scoring of candidate lists. No DOM here: every function takes the
//! already-cleaned item texts so it can be checked against literal fixtures.

use regex::Regex;
use std::sync::LazyLock;

static QUANTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^\s*(?:
            [0-9]
          | [¼½¾⅓⅔⅛⅜⅝⅞⅕⅖⅗⅘⅙⅚]
          | (?:one|two|three|four|five|six|seven|eight|nine|ten|twelve|half|dozen)\b
        )",
    )
    .expect("valid regex")
});

static UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:cups?|tbsps?|tsps?|tablespoons?|teaspoons?|grams?|kg|ml|litres?|liters?|oz|ounces?|lbs?|pounds?|cloves?|cans?|pinch(?:es)?|dash(?:es)?|handfuls?|slices?|sticks?|packages?)\b",
    )
    .expect("valid regex")
});

static COOKING_VERB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:step\s*\d+[:.]?\s*)?(?:add|bake|beat|blend|boil|bring|chop|combine|cook|cool|cover|cut|drain|fold|fry|grill|heat|knead|let|mix|place|pour|preheat|prepare|reduce|remove|roast|saute|sauté|season|serve|simmer|slice|spread|sprinkle|stir|strain|top|transfer|turn|whisk)\b",
    )
    .expect("valid regex")
});

/// Lists at or above this score are treated as ingredient lists.
pub const INGREDIENT_THRESHOLD: f64 = 2.5;

/// Fallback step lists must reach this [`score_steps`] value.
pub const STEP_THRESHOLD: f64 = 2.5;

/// Score how ingredient-like a list of item texts is.
///
/// Sum of three signals: item count (best at 3–30), average item length
/// (short-to-medium lines), and the share of items that lead with a
/// quantity or mention a unit, weighted ×3. Fewer than two items scores 0.
/// Articles ("a", "some") are not quantities on their own; "a pinch of salt"
/// counts through its unit.
///
/// # Examples
/// ```
/// use recipe_scrape::tools::heuristics::score_list;
///
/// let ingredients: Vec<String> = ["2 cups flour", "1 tsp salt", "3 eggs"]
///     .iter().map(|s| s.to_string()).collect();
/// let nav: Vec<String> = ["Home", "About", "Contact"].iter().map(|s| s.to_string()).collect();
/// assert!(score_list(&ingredients) > score_list(&nav));
/// ```
pub fn score_list(items: &[String]) -> f64 {
    let n = items.len();
    if n < 2 {
        return 0.0;
    }

    let count_score = match n {
        2 => 0.4,
        3..=30 => 1.0,
        _ => 30.0 / n as f64,
    };

    let length_score = match average_chars(items) {
        avg if avg < 5.0 => 0.2,
        avg if avg <= 80.0 => 1.0,
        avg if avg <= 150.0 => 0.5,
        _ => 0.1,
    };

    let quantified = items
        .iter()
        .filter(|t| QUANTITY_REGEX.is_match(t) || UNIT_REGEX.is_match(t))
        .count();
    let quantity_score = 3.0 * quantified as f64 / n as f64;

    count_score + length_score + quantity_score
}

/// Score how instruction-like a list of item texts is.
///
/// Favors full sentences, longer lines, and items opening with a cooking
/// verb. Ingredient-style lines score low.
pub fn score_steps(items: &[String]) -> f64 {
    let n = items.len();
    if n == 0 {
        return 0.0;
    }

    let count_score = if n >= 2 { 1.0 } else { 0.5 };

    let length_score = match average_chars(items) {
        avg if avg >= 40.0 => 1.0,
        avg if avg >= 20.0 => 0.6,
        _ => 0.1,
    };

    let sentences = items
        .iter()
        .filter(|t| {
            let t = t.trim_end();
            t.ends_with(['.', '!', ')']) || t.contains(". ")
        })
        .count();
    let sentence_score = 2.0 * sentences as f64 / n as f64;

    let verbs = items.iter().filter(|t| COOKING_VERB_REGEX.is_match(t)).count();
    let verb_score = verbs as f64 / n as f64;

    count_score + length_score + sentence_score + verb_score
}

fn average_chars(items: &[String]) -> f64 {
    let total: usize = items.iter().map(|t| t.chars().count()).sum();
    total as f64 / items.len().max(1) as f64
}
