//! Charset detection and transcoding to UTF-8.

use encoding_rs::Encoding;
use regex::bytes::Regex;
use std::sync::LazyLock;

const META_SCAN_BYTES: usize = 1024;

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9_\-:.]+)"#).expect("valid regex")
});

/// Decode a response body to UTF-8.
///
/// Priority: `charset=` in the Content-Type header, then a `<meta>` charset in
/// the first kilobyte, then UTF-8. Invalid sequences become U+FFFD; this
/// never fails.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(bytes));

    if let Some(encoding) = declared {
        if encoding != encoding_rs::UTF_8 {
            let (decoded, _, had_errors) = encoding.decode(bytes);
            if had_errors {
                tracing::debug!(encoding = encoding.name(), "replaced malformed byte sequences");
            }
            return decoded.into_owned();
        }
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            tracing::debug!("falling back to lossy UTF-8 conversion: {e}");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let lower = content_type.to_ascii_lowercase();
    let value = lower
        .split("charset=")
        .nth(1)?
        .trim_start_matches(['"', '\''])
        .split(['"', '\'', ';', ',', ' '])
        .next()?
        .trim();
    if value.is_empty() {
        return None;
    }
    Encoding::for_label(value.as_bytes())
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SCAN_BYTES)];
    let caps = META_CHARSET_REGEX.captures(head)?;
    Encoding::for_label(caps.get(1)?.as_bytes())
}
