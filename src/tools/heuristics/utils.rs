use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::sync::LazyLock;

use crate::config::ScanLimits;
use crate::dom::{class_and_id, element_text, has_ancestor_named};
use crate::selectors::{BODY_SELECTOR, HEADING_SELECTOR, IMG_SELECTOR, LI_SELECTOR, P_SELECTOR};
use crate::tools::clean::clean;
use crate::tools::parse::{parse_servings, parse_text_duration};

static INSTRUCTION_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:instructions?|directions?|method|steps?|preparation|how to make)\b")
        .expect("valid regex")
});

const DURATION: &str =
    r"(\d+(?:[.,]\d+)?\s*(?:hours?|hrs?|h|minutes?|mins?|m)\b(?:\s*(?:and\s*)?\d+\s*(?:minutes?|mins?|m)\b)?)";

static PREP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bprep(?:aration)?(?:\s+time)?\s*[:\-]?\s*{DURATION}")).expect("valid regex")
});

static COOK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\bcook(?:ing)?(?:\s+time)?\s*[:\-]?\s*{DURATION}")).expect("valid regex")
});

static TOTAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\btotal(?:\s+time)?\s*[:\-]?\s*{DURATION}")).expect("valid regex")
});

static SERVINGS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:serves|servings|yields?|makes)\s*:?\s*(?:about\s+|up to\s+)?(\d+)|\b(\d+)\s+servings\b")
        .expect("valid regex")
});

const CHROME_ELEMENTS: [&str; 3] = ["nav", "header", "footer"];
const LINK_PENALTY: f64 = 0.2;
const CONTEXT_BONUS: f64 = 2.0;
const CONTEXT_ANCESTORS: usize = 3;
const MAX_HEADING_WORDS: usize = 5;

/// A `<ul>`/`<ol>` with its cleaned item texts and the nearest preceding heading.
#[derive(Debug)]
pub(super) struct ListCandidate<'a> {
    pub el: ElementRef<'a>,
    pub items: Vec<String>,
    pub heading: String,
    pub link_items: usize,
}

impl ListCandidate<'_> {
    /// True when the list, a close ancestor, or its heading mentions ingredients.
    pub(super) fn ingredient_context(&self) -> bool {
        let mentions = |s: &str| s.to_ascii_lowercase().contains("ingredient");
        mentions(&self.heading)
            || std::iter::once(self.el)
                .chain(self.el.ancestors().filter_map(ElementRef::wrap))
                .take(CONTEXT_ANCESTORS + 1)
                .any(|el| mentions(&class_and_id(el)))
    }

    /// `score_list` adjusted by page context.
    pub(super) fn ingredient_score(&self, base: f64) -> f64 {
        let mut score = base;
        if self.link_items * 2 > self.items.len() {
            score *= LINK_PENALTY;
        }
        if self.ingredient_context() {
            score += CONTEXT_BONUS;
        }
        score
    }
}

/// Lists in document order, skipping site chrome, with the heading text that
/// precedes each. One iterative pass over the tree.
pub(super) fn candidate_lists<'a>(doc: &'a Html, limits: &ScanLimits) -> Vec<ListCandidate<'a>> {
    let mut out = Vec::new();
    let mut heading = String::new();

    for el in doc.root_element().descendants().filter_map(ElementRef::wrap) {
        match el.value().name() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => heading = element_text(el),
            "ul" | "ol" => {
                if out.len() >= limits.max_lists_scanned {
                    break;
                }
                if has_ancestor_named(el, &CHROME_ELEMENTS) {
                    continue;
                }
                let (items, link_items) = list_items(el, limits.max_list_items);
                if !items.is_empty() {
                    out.push(ListCandidate {
                        el,
                        items,
                        heading: heading.clone(),
                        link_items,
                    });
                }
            }
            _ => {}
        }
    }
    out
}

/// Direct `<li>` children as cleaned text, plus how many are mostly a link.
fn list_items(list: ElementRef<'_>, max: usize) -> (Vec<String>, usize) {
    let mut items = Vec::new();
    let mut link_items = 0;

    for li in list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name() == "li")
        .take(max)
    {
        let text = clean(&element_text(li));
        if text.is_empty() {
            continue;
        }
        let linked: usize = li
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == "a")
            .map(|a| clean(&element_text(a)).chars().count())
            .sum();
        if linked * 5 >= text.chars().count() * 4 {
            link_items += 1;
        }
        items.push(text);
    }
    (items, link_items)
}

/// First short heading that announces instructions ("Directions", "Method").
pub(super) fn instruction_heading<'a>(doc: &'a Html) -> Option<ElementRef<'a>> {
    doc.select(&HEADING_SELECTOR).find(|h| {
        let text = clean(&element_text(*h));
        !text.is_empty()
            && text.split_whitespace().count() <= MAX_HEADING_WORDS
            && !text.to_ascii_lowercase().contains("ingredient")
            && INSTRUCTION_HEADING_REGEX.is_match(&text)
    })
}

/// Steps under an instruction heading: list items and paragraphs among the
/// following siblings, up to the next heading. Retries from the heading's
/// parent when the heading sits alone in a wrapper.
pub(super) fn steps_after(
    heading: ElementRef<'_>,
    skip: Option<ElementRef<'_>>,
    max: usize,
) -> Vec<String> {
    let steps = steps_following(heading, skip, max);
    if !steps.is_empty() {
        return steps;
    }
    heading
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| steps_following(parent, skip, max))
        .unwrap_or_default()
}

fn steps_following(start: ElementRef<'_>, skip: Option<ElementRef<'_>>, max: usize) -> Vec<String> {
    let is_heading = |el: ElementRef<'_>| matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6");
    let skipped = |el: ElementRef<'_>| skip.is_some_and(|s| s.id() == el.id());
    let mut out: Vec<String> = Vec::new();

    for sib in start.next_siblings().filter_map(ElementRef::wrap) {
        if is_heading(sib) || sib.select(&HEADING_SELECTOR).next().is_some() {
            break;
        }
        if skipped(sib) {
            continue;
        }
        match sib.value().name() {
            "ul" | "ol" => out.extend(sib.select(&LI_SELECTOR).map(element_text)),
            "p" => out.push(element_text(sib)),
            _ => {
                let items: Vec<String> = sib
                    .select(&LI_SELECTOR)
                    .filter(|li| !li.ancestors().any(|a| skip.is_some_and(|s| s.id() == a.id())))
                    .map(element_text)
                    .collect();
                if items.is_empty() {
                    out.extend(sib.select(&P_SELECTOR).map(element_text));
                } else {
                    out.extend(items);
                }
            }
        }
        if out.len() >= max {
            break;
        }
    }

    let mut steps: Vec<String> = out
        .iter()
        .map(|t| clean(t))
        .filter(|t| !t.is_empty())
        .collect();
    steps.truncate(max);
    steps
}

/// Largest `<img>` by declared width×height among the first few, else the
/// first one with a usable source.
pub(super) fn largest_image(doc: &Html, max_images: usize) -> Option<String> {
    let mut best: Option<(u64, String)> = None;
    let mut first: Option<String> = None;

    for img in doc.select(&IMG_SELECTOR).take(max_images) {
        let v = img.value();
        let Some(src) = ["src", "data-src", "data-lazy-src"]
            .iter()
            .filter_map(|a| v.attr(a))
            .map(str::trim)
            .find(|s| !s.is_empty() && !s.starts_with("data:"))
        else {
            continue;
        };
        if first.is_none() {
            first = Some(src.to_string());
        }
        let dim = |a: &str| -> u64 {
            v.attr(a)
                .map(|d| d.trim().trim_end_matches("px"))
                .and_then(|d| d.parse().ok())
                .unwrap_or(0)
        };
        let area = dim("width") * dim("height");
        if area > 0 && best.as_ref().map_or(true, |(a, _)| area > *a) {
            best = Some((area, src.to_string()));
        }
    }
    best.map(|(_, src)| src).or(first)
}

/// Visible text of `<body>` (script/style excluded), capped at `max_bytes`.
pub(super) fn visible_text(doc: &Html, max_bytes: usize) -> String {
    let root = doc
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| doc.root_element());
    let mut out = String::new();

    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| e.name()))
            .is_some_and(|name| matches!(name, "script" | "style" | "noscript" | "template"));
        if hidden {
            continue;
        }
        out.push_str(text);
        out.push(' ');
        if out.len() >= max_bytes {
            break;
        }
    }

    if out.len() > max_bytes {
        let mut cut = max_bytes;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
    clean(&out)
}

/// Times and yield mentioned in running text.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct TextFacts {
    pub prep: Option<u32>,
    pub cook: Option<u32>,
    pub total: Option<u32>,
    pub servings: Option<u32>,
}

pub(super) fn text_facts(text: &str) -> TextFacts {
    let duration = |re: &Regex| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_text_duration(m.as_str()))
    };
    TextFacts {
        prep: duration(&PREP_REGEX),
        cook: duration(&COOK_REGEX),
        total: duration(&TOTAL_REGEX),
        servings: SERVINGS_REGEX
            .captures(text)
            .and_then(|c| c.get(1).or_else(|| c.get(2)))
            .and_then(|m| parse_servings(m.as_str())),
    }
}
