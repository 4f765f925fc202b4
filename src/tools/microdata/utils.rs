use scraper::{ElementRef, Html};

use crate::dom::element_text;
use crate::selectors::sel;

/// Elements typed as a Schema.org Recipe, in document order.
pub(super) fn recipe_roots(doc: &Html) -> Vec<ElementRef<'_>> {
    let Some(typed) = sel("[itemtype], [typeof]") else {
        return Vec::new();
    };
    doc.select(&typed)
        .filter(|el| {
            let v = el.value();
            v.attr("itemtype").is_some_and(names_recipe) || v.attr("typeof").is_some_and(names_recipe)
        })
        .collect()
}

/// Any whitespace-separated type token whose local name is `Recipe`
/// (`http://schema.org/Recipe`, `schema:Recipe`, `Recipe`).
fn names_recipe(types: &str) -> bool {
    types.split_whitespace().any(|t| {
        let t = t.trim_end_matches('/');
        t.rsplit(['/', ':', '#'])
            .next()
            .is_some_and(|local| local.eq_ignore_ascii_case("recipe"))
    })
}

/// Properties of one item, in document order.
#[derive(Debug, Default)]
pub(super) struct ItemProps<'a> {
    entries: Vec<(String, ElementRef<'a>)>,
}

impl<'a> ItemProps<'a> {
    pub(super) fn first(&self, name: &str) -> Option<ElementRef<'a>> {
        self.all(name).next()
    }

    pub(super) fn all<'s>(&'s self, name: &'s str) -> impl Iterator<Item = ElementRef<'a>> + 's {
        self.entries
            .iter()
            .filter(move |(prop, _)| prop.eq_ignore_ascii_case(name))
            .map(|(_, el)| *el)
    }
}

/// Collect `itemprop` (or RDFa `property`) elements belonging to `root`.
///
/// Nested item scopes (an author `Person`, `NutritionInformation`) are
/// reported under their own property name but not descended into, so their
/// `name` never shadows the recipe's.
pub(super) fn item_props(root: ElementRef<'_>) -> ItemProps<'_> {
    let mut entries = Vec::new();
    let mut stack: Vec<ElementRef<'_>> = children_rev(root);

    while let Some(el) = stack.pop() {
        let v = el.value();
        if let Some(props) = v.attr("itemprop").or_else(|| v.attr("property")) {
            for prop in props.split_whitespace() {
                let local = prop.rsplit([':', '/']).next().unwrap_or(prop);
                entries.push((local.to_string(), el));
            }
        }
        if v.attr("itemscope").is_some() || v.attr("typeof").is_some() {
            continue;
        }
        stack.extend(children_rev(el));
    }
    ItemProps { entries }
}

fn children_rev(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut children: Vec<_> = el.children().filter_map(ElementRef::wrap).collect();
    children.reverse();
    children
}

/// Property value per the Microdata rules, falling back to a `content`
/// attribute and then visible text.
pub(super) fn prop_value(el: ElementRef<'_>) -> String {
    let v = el.value();
    let attr = match v.name() {
        "meta" => v.attr("content"),
        "img" | "audio" | "video" | "source" | "embed" | "iframe" | "track" => v.attr("src"),
        "a" | "area" | "link" => v.attr("href"),
        "object" => v.attr("data"),
        "time" => v.attr("datetime"),
        "data" | "meter" => v.attr("value"),
        _ => v.attr("content"),
    };
    match attr {
        Some(a) if !a.trim().is_empty() => a.trim().to_string(),
        _ => element_text(el),
    }
}

/// Text-valued property (`name`, `recipeIngredient`, ...): a `content`
/// attribute, else visible text. Link and media targets are only used when
/// the element has no text at all.
pub(super) fn text_value(el: ElementRef<'_>) -> String {
    if let Some(content) = el.value().attr("content").map(str::trim).filter(|c| !c.is_empty()) {
        return content.to_string();
    }
    let text = element_text(el);
    if text.trim().is_empty() {
        prop_value(el)
    } else {
        text
    }
}

/// URL-valued property (`image`): `src`, lazy-load `data-src`, `href`,
/// `content`, or the `url` of an `ImageObject` scope.
pub(super) fn url_value(el: ElementRef<'_>) -> Option<String> {
    url_attr(el).or_else(|| {
        let props = item_props(el);
        props
            .first("url")
            .or_else(|| props.first("contentUrl"))
            .and_then(url_attr)
    })
}

fn url_attr(el: ElementRef<'_>) -> Option<String> {
    let v = el.value();
    ["src", "data-src", "href", "content"]
        .iter()
        .filter_map(|a| v.attr(a))
        .map(str::trim)
        .find(|a| !a.is_empty())
        .map(str::to_string)
}
