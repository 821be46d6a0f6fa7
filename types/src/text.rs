//! Small text helpers for log output.

/// Ellipsis appended to truncated text.
const ELLIPSIS: &str = "...";

/// Truncate `raw` so the result, ellipsis included, is at most `max`
/// characters. Counted in chars, never bytes, so multi-byte input is not
/// split mid-scalar. Input that already fits comes back unchanged; `max` is
/// floored at 3 so the ellipsis itself always fits.
#[must_use]
pub fn truncate_with_ellipsis(raw: &str, max: usize) -> String {
    let max = max.max(3);
    if raw.chars().count() <= max {
        return raw.to_string();
    }
    // The ellipsis is ASCII, so its char count equals its byte length.
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = raw.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
