use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

/// Desktop Chrome header set (minus User-Agent). Many recipe hosts serve a
/// stripped page or a bot wall to clients that look like curl.
const BROWSER_HEADERS: [(&str, &str); 9] = [
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"),
    ("accept-language", "en-US,en;q=0.9"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-ch-ua", "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\""),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
];

/// Browser headers plus the configured User-Agent.
pub(crate) fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (k, v) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
    }
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).unwrap_or(HeaderValue::from_static("Mozilla/5.0")),
    );
    headers
}
