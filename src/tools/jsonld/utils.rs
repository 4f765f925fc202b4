use serde_json::Value;

/// `type` attribute check, tolerant of case and parameters.
pub(super) fn is_json_ld_type(raw: &str) -> bool {
    raw.trim()
        .to_ascii_lowercase()
        .starts_with("application/ld+json")
}

/// Escape literal control characters inside JSON strings.
///
/// Many CMSes paste raw newlines and tabs into string values, which strict
/// JSON rejects.
pub fn sanitize_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// True when `@type` names Recipe (string or array, any case, optionally
/// prefixed like `schema:Recipe` or `https://schema.org/Recipe`).
pub(super) fn is_recipe_type(value: &Value) -> bool {
    fn names_recipe(s: &str) -> bool {
        let s = s.trim();
        let local = s.rsplit(['/', ':', '#']).next().unwrap_or(s);
        local.eq_ignore_ascii_case("recipe")
    }

    match value {
        Value::String(s) => names_recipe(s),
        Value::Array(items) => items.iter().filter_map(Value::as_str).any(names_recipe),
        _ => false,
    }
}

/// Every Recipe-typed object reachable from `root`, in document order.
///
/// Handles a bare object, a top-level array, `@graph`, and objects nested
/// under other keys (`mainEntity`, `itemListElement`). Walks with an explicit
/// stack and stops descending below `max_depth`.
pub(super) fn recipe_nodes(root: &Value, max_depth: usize) -> Vec<&Value> {
    let mut found = Vec::new();
    let mut stack: Vec<(&Value, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth > max_depth {
            continue;
        }
        match node {
            Value::Object(obj) => {
                if obj.get("@type").is_some_and(is_recipe_type) {
                    found.push(node);
                    continue;
                }
                let children: Vec<&Value> = obj
                    .iter()
                    .filter(|(k, _)| *k != "@context")
                    .map(|(_, v)| v)
                    .filter(|v| v.is_object() || v.is_array())
                    .collect();
                stack.extend(children.into_iter().rev().map(|v| (v, depth + 1)));
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev().map(|v| (v, depth + 1)));
            }
            _ => {}
        }
    }
    found
}
