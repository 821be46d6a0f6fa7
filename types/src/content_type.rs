//! Content-Type allowlist for fetched markdown.

/// MIME types accepted as markdown source.
///
/// `application/octet-stream` is included because raw file hosts commonly
/// serve text under it rather than sniffing.
pub const MARKDOWN_CONTENT_TYPES: &[&str] = &[
    "text/plain",
    "text/markdown",
    "text/x-markdown",
    "application/octet-stream",
];

/// Decide whether a response's declared Content-Type may be treated as
/// markdown source.
///
/// The comparison is case-insensitive and ignores parameters after the
/// first `;` (e.g., `text/plain; charset=utf-8`). An absent, empty, or
/// whitespace-only header is allowed — many servers omit it for plain
/// text. Everything outside the allowlist is refused; this is a coarse
/// pre-filter in front of render-time sanitization, aimed at never
/// treating HTML, scripts, or binary payloads as text.
#[must_use]
pub fn is_markdown_content_type(content_type: Option<&str>) -> bool {
    let Some(raw) = content_type else {
        return true;
    };
    let essence = raw.split(';').next().unwrap_or("").trim();
    if essence.is_empty() {
        return true;
    }
    MARKDOWN_CONTENT_TYPES
        .iter()
        .any(|allowed| essence.eq_ignore_ascii_case(allowed))
}

#[cfg(test)]
mod tests {
    use super::is_markdown_content_type;

    #[test]
    fn accepts_plain_text_with_charset() {
        assert!(is_markdown_content_type(Some("text/plain; charset=utf-8")));
    }

    #[test]
    fn accepts_markdown_types() {
        assert!(is_markdown_content_type(Some("text/markdown")));
        assert!(is_markdown_content_type(Some("text/x-markdown")));
    }

    #[test]
    fn accepts_octet_stream() {
        assert!(is_markdown_content_type(Some("application/octet-stream")));
    }

    #[test]
    fn accepts_mixed_case() {
        assert!(is_markdown_content_type(Some("Text/Plain")));
        assert!(is_markdown_content_type(Some("TEXT/MARKDOWN; CHARSET=UTF-8")));
    }

    #[test]
    fn accepts_absent_header() {
        assert!(is_markdown_content_type(None));
    }

    #[test]
    fn accepts_empty_header() {
        assert!(is_markdown_content_type(Some("")));
        assert!(is_markdown_content_type(Some("   ")));
        // A bare parameter list with no media type reads as absent.
        assert!(is_markdown_content_type(Some("; charset=utf-8")));
    }

    #[test]
    fn rejects_html() {
        assert!(!is_markdown_content_type(Some("text/html")));
        assert!(!is_markdown_content_type(Some("text/html; charset=utf-8")));
    }

    #[test]
    fn rejects_scripts() {
        assert!(!is_markdown_content_type(Some("text/javascript")));
        assert!(!is_markdown_content_type(Some("application/javascript")));
        assert!(!is_markdown_content_type(Some("text/vbscript")));
    }

    #[test]
    fn rejects_json_and_xml() {
        assert!(!is_markdown_content_type(Some("application/json")));
        assert!(!is_markdown_content_type(Some("text/xml")));
    }

    #[test]
    fn rejects_images() {
        assert!(!is_markdown_content_type(Some("image/png")));
        assert!(!is_markdown_content_type(Some("image/svg+xml")));
    }

    #[test]
    fn rejects_near_misses() {
        assert!(!is_markdown_content_type(Some("text/plains")));
        assert!(!is_markdown_content_type(Some("application/markdown")));
    }
}
