//! Small DOM helpers shared by the tiers.

use scraper::{ElementRef, Html, Node};

use crate::selectors::META_SELECTOR;

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

const BLOCK_ELEMENTS: [&str; 20] = [
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
    "tr", "td", "th", "dd", "dt", "figcaption", "blockquote",
];

/// Visible text of `el` on one line; block boundaries become spaces.
pub fn element_text(el: ElementRef<'_>) -> String {
    collect_text(el, " ")
}

/// Visible text of `el` with block boundaries and `<br>` kept as newlines.
pub fn element_lines(el: ElementRef<'_>) -> String {
    collect_text(el, "\n")
}

fn collect_text(el: ElementRef<'_>, sep: &str) -> String {
    let mut out = String::new();
    let mut last_block = None;

    for node in el.descendants() {
        match node.value() {
            Node::Element(e) if e.name() == "br" => out.push_str(sep),
            Node::Text(text) => {
                let mut block = el.id();
                let mut hidden = false;
                for anc in node.ancestors() {
                    if anc.id() == el.id() {
                        break;
                    }
                    if let Some(e) = anc.value().as_element() {
                        if HIDDEN_ELEMENTS.contains(&e.name()) {
                            hidden = true;
                            break;
                        }
                        if block == el.id() && BLOCK_ELEMENTS.contains(&e.name()) {
                            block = anc.id();
                        }
                    }
                }
                if hidden {
                    continue;
                }
                if last_block.is_some_and(|b| b != block) {
                    out.push_str(sep);
                }
                out.push_str(text);
                last_block = Some(block);
            }
            _ => {}
        }
    }
    out
}

/// Content of the first `<meta>` whose `name` or `property` equals one of
/// `keys` (case-insensitive), trying keys in order.
pub fn meta_content(doc: &Html, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        doc.select(&META_SELECTOR).find_map(|el| {
            let v = el.value();
            let name = v.attr("property").or_else(|| v.attr("name"))?;
            if !name.trim().eq_ignore_ascii_case(key) {
                return None;
            }
            v.attr("content")
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        })
    })
}

/// Lowercased `class` and `id` of an element, space-joined.
pub fn class_and_id(el: ElementRef<'_>) -> String {
    let v = el.value();
    format!(
        "{} {}",
        v.attr("class").unwrap_or_default(),
        v.attr("id").unwrap_or_default()
    )
    .to_ascii_lowercase()
}

/// True when `el` sits inside one of the named elements.
pub fn has_ancestor_named(el: ElementRef<'_>, names: &[&str]) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| names.contains(&a.value().name()))
}
