//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for typed script tags (JSON-LD candidates; the type is compared case-insensitively).
pub static TYPED_SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[type]").expect("valid script selector"));

/// Selector for `<title>` tags.
pub static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Selector for the first-level page heading.
pub static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("valid h1 selector"));

/// Selector for every heading level.
pub static HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid heading selector"));

/// Selector for metadata tags with name/property attributes.
pub static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name], meta[property]").expect("valid metadata selector"));

/// Selector for list items.
pub static LI_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("valid li selector"));

/// Selector for paragraphs.
pub static P_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid p selector"));

/// Selector for images with a source.
pub static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("valid img selector"));

/// Selector for `<time>` elements.
pub static TIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("time").expect("valid time selector"));

/// Selector for `<body>` elements.
pub static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("valid body selector"));

/// Parse a selector at runtime; `None` for invalid syntax.
pub fn sel(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}
