//! Tolerant parsing of recipe times and yields.
//!
//! Every parser returns `None` instead of failing so one bad field never sinks
//! a whole extraction.


use regex::Regex;
use std::sync::LazyLock;

static ISO_DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^P
        (?:(\d+(?:\.\d+)?)W)?
        (?:(\d+(?:\.\d+)?)D)?
        (?:T
            (?:(\d+(?:\.\d+)?)H)?
            (?:(\d+(?:\.\d+)?)M)?
            (?:(\d+(?:\.\d+)?)S)?
        )?$",
    )
    .expect("valid regex")
});

static TEXT_DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(days?|hours?|hrs?|h|minutes?|mins?|m)").expect("valid regex")
});

static FIRST_INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Parse an ISO 8601 duration (`PT1H30M`) into whole minutes.
///
/// A bare integer is read as minutes. Seconds round to the nearest minute.
/// Zero-length, empty, and non-ISO text (`"15 minutes"`) yield `None`.
///
/// # Examples
/// ```
/// use recipe_scrape::tools::parse::parse_iso_duration;
///
/// assert_eq!(parse_iso_duration("PT1H15M"), Some(75));
/// assert_eq!(parse_iso_duration("PT2H"), Some(120));
/// assert_eq!(parse_iso_duration("15 minutes"), None);
/// ```
pub fn parse_iso_duration(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(minutes) = s.parse::<u32>() {
        return (minutes > 0).then_some(minutes);
    }

    let caps = ISO_DURATION_REGEX.captures(s)?;
    let part = |idx: usize| -> f64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    // "P" and "PT" alone match the pattern but carry no components.
    if (1..=5).all(|idx| caps.get(idx).is_none()) {
        return None;
    }

    let seconds = part(1) * 7.0 * 86_400.0
        + part(2) * 86_400.0
        + part(3) * 3_600.0
        + part(4) * 60.0
        + part(5);
    minutes_from_seconds(seconds)
}

/// Parse a human duration (`"1 hour 15 mins"`, `"1h30m"`, `"1.5 hours"`) into minutes.
///
/// ISO strings and bare integers are accepted too.
pub fn parse_text_duration(raw: &str) -> Option<u32> {
    if let Some(minutes) = parse_iso_duration(raw) {
        return Some(minutes);
    }

    let mut seconds = 0.0;
    let mut matched = false;
    for cap in TEXT_DURATION_REGEX.captures_iter(raw) {
        let value = cap[1].replace(',', ".").parse::<f64>().ok()?;
        let unit = cap[2].to_ascii_lowercase();
        let scale = if unit.starts_with('d') {
            86_400.0
        } else if unit.starts_with('h') {
            3_600.0
        } else {
            60.0
        };
        seconds += value * scale;
        matched = true;
    }

    if !matched {
        return None;
    }
    minutes_from_seconds(seconds)
}

/// Parse the leading integer of a yield (`"4 servings"`, `"Serves 4-6"`).
///
/// # Examples
/// ```
/// use recipe_scrape::tools::parse::parse_servings;
///
/// assert_eq!(parse_servings("2 servings"), Some(2));
/// assert_eq!(parse_servings("Makes about 24 cookies"), Some(24));
/// assert_eq!(parse_servings("a crowd"), None);
/// ```
pub fn parse_servings(raw: &str) -> Option<u32> {
    FIRST_INTEGER_REGEX
        .find(raw)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

fn minutes_from_seconds(seconds: f64) -> Option<u32> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let minutes = (seconds / 60.0).round();
    if minutes < 1.0 || minutes > u32::MAX as f64 {
        return None;
    }
    Some(minutes as u32)
}
