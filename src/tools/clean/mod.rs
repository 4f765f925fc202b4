mod utils;


use utils::*;

/// Clean text.
///
/// Performs the following operations in order:
/// 1. Strip HTML tags (`<b>salt</b>` → `salt`)
/// 2. Decode HTML entities (`&amp;` → `&`, `&#39;` → `'`)
/// 3. Normalize Unicode to NFC (canonical composition)
/// 4. Drop zero-width and control characters (newlines/tabs survive until step 5)
/// 5. Normalize whitespace (collapse runs, trim)
///
/// # Examples
/// ```
/// use recipe_scrape::tools::clean::clean;
///
/// let dirty = "<p>1 cup &amp; a   half of <b>flour</b></p>";
/// assert_eq!(clean(dirty), "1 cup & a half of flour");
/// ```
pub fn clean(text: &str) -> String {
    normalize_whitespace(&clean_keep_lines(text))
}

/// Like [`clean`], but keeps line structure: block-level tags and `<br>` become
/// newlines and each line is whitespace-normalized. Blank lines are dropped.
///
/// # Examples
/// ```
/// use recipe_scrape::tools::clean::clean_lines;
///
/// let lines = clean_lines("Boil water.<br>Add   carrots.\n\n");
/// assert_eq!(lines, vec!["Boil water.", "Add carrots."]);
/// ```
pub fn clean_lines(text: &str) -> Vec<String> {
    clean_keep_lines(&breaks_to_newlines(text))
        .lines()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Clean all text strings in a collection, dropping the ones that end up empty.
pub fn clean_all<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts
        .iter()
        .map(|t| clean(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

fn clean_keep_lines(text: &str) -> String {
    let mut result = strip_tags(text);
    result = decode_html_entities(&result);
    // Entities can hide markup (`&lt;b&gt;`); strip once more after decoding.
    if result.contains('<') {
        result = strip_tags(&result);
    }
    result = normalize_unicode(&result);
    remove_invisible_chars(&result)
}
