use scraper::{ElementRef, Html};

use crate::dom::{element_text, meta_content};
use crate::selectors::{sel, P_SELECTOR};

/// Visible text of every match of `css`, in document order.
pub(super) fn texts(doc: &Html, css: &str) -> Vec<String> {
    match sel(css) {
        Some(s) => doc.select(&s).map(element_text).collect(),
        None => Vec::new(),
    }
}

/// Texts of the first selector in `candidates` that matches anything.
pub(super) fn first_texts(doc: &Html, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .map(|css| texts(doc, css))
        .find(|found| found.iter().any(|t| !t.trim().is_empty()))
        .unwrap_or_default()
}

/// First non-empty text among `candidates`.
pub(super) fn first_text(doc: &Html, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|css| {
        texts(doc, css)
            .into_iter()
            .find(|t| !t.trim().is_empty())
    })
}

/// First element matching `css`.
pub(super) fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let s = sel(css)?;
    doc.select(&s).next()
}

/// Step text from a list item, preferring its paragraphs over captions and
/// step-number labels.
pub(super) fn step_text(li: ElementRef<'_>) -> String {
    let paragraphs: Vec<String> = li.select(&P_SELECTOR).map(element_text).collect();
    if paragraphs.is_empty() {
        element_text(li)
    } else {
        paragraphs.join(" ")
    }
}

/// Image URL from the first `img` matching `css` (lazy-load aware), else `og:image`.
pub(super) fn image(doc: &Html, css: &str) -> Option<String> {
    first(doc, css)
        .and_then(|img| {
            let v = img.value();
            ["data-src", "data-lazy-src", "src"]
                .iter()
                .filter_map(|a| v.attr(a))
                .map(str::trim)
                .find(|a| !a.is_empty() && !a.starts_with("data:"))
                .map(str::to_string)
        })
        .or_else(|| meta_content(doc, &["og:image"]))
}

/// Leading integer of a text (`"15 mins"` -> 15), zero allowed.
pub(super) fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
