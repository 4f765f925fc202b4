//! Per-field shape normalizers. Each takes the raw JSON value and folds the
//! known Schema.org shape variants into one meaning.

use serde_json::Value;

use crate::tools::clean::clean_lines;
use crate::tools::parse::{parse_iso_duration, parse_servings};

/// Plain text: a string, the first string of an array, or `@value`.
pub(super) fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.iter().find_map(text_value),
        Value::Object(obj) => obj.get("@value").and_then(text_value),
        _ => None,
    }
}

pub(super) fn servings_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0),
        Value::String(s) => parse_servings(s),
        Value::Array(items) => items.iter().find_map(servings_value),
        _ => None,
    }
}

/// ISO 8601 duration or a bare number of minutes. Anything else is `None`.
pub(super) fn duration_value(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => parse_iso_duration(s),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0),
        Value::Array(items) => items.iter().find_map(duration_value),
        _ => None,
    }
}

/// Image URL from a string, an array (first usable), or an `ImageObject`.
pub(super) fn image_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items.iter().find_map(image_value),
        Value::Object(obj) => ["url", "contentUrl", "@id"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(image_value)),
        _ => None,
    }
}

/// Ingredient lines from an array of strings or objects, or one string with
/// embedded line breaks.
pub(super) fn ingredient_values(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => clean_lines(s),
        Value::Array(items) => items
            .iter()
            .flat_map(|item| match item {
                Value::String(s) => vec![s.clone()],
                Value::Object(_) => ingredient_object(item).into_iter().collect(),
                Value::Number(n) => vec![n.to_string()],
                _ => Vec::new(),
            })
            .collect(),
        Value::Object(_) => ingredient_object(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// `{text}` / `{@value}`, else `quantity unit name` reassembled.
fn ingredient_object(obj: &Value) -> Option<String> {
    if let Some(text) = ["text", "@value"]
        .iter()
        .find_map(|k| obj.get(*k).and_then(text_value))
        .filter(|t| !t.trim().is_empty())
    {
        return Some(text);
    }

    let part = |keys: &[&str]| keys.iter().find_map(|k| obj.get(*k).and_then(text_value));
    let parts: Vec<String> = [
        part(&["quantity", "amount"]),
        part(&["unitText", "unit"]),
        part(&["name", "ingredient"]),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.trim().is_empty())
    .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Ordered step texts from any `recipeInstructions` shape: a string with
/// embedded separators, `HowToStep` objects, `HowToSection` groups, nested
/// arrays.
pub(super) fn instruction_values(value: &Value, max_depth: usize) -> Vec<String> {
    let mut steps = Vec::new();
    collect_instructions(value, max_depth, &mut steps);
    steps
}

fn collect_instructions(value: &Value, depth_left: usize, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.extend(clean_lines(s)),
        Value::Array(items) if depth_left > 0 => {
            for item in items {
                collect_instructions(item, depth_left - 1, out);
            }
        }
        Value::Object(obj) if depth_left > 0 => {
            let sectioned = obj.get("@type").is_some_and(|t| {
                t.as_str()
                    .is_some_and(|s| s.eq_ignore_ascii_case("HowToSection") || s.eq_ignore_ascii_case("ItemList"))
            });
            match obj.get("itemListElement") {
                Some(children) if sectioned || !obj.contains_key("text") => {
                    collect_instructions(children, depth_left - 1, out);
                }
                _ => {
                    if let Some(text) = ["text", "description", "name"]
                        .iter()
                        .find_map(|k| obj.get(*k).and_then(text_value))
                        .filter(|t| !t.trim().is_empty())
                    {
                        out.push(text);
                    }
                }
            }
        }
        _ => {}
    }
}
