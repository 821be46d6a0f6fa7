//! Host-specific URL rewriting for markdown sources.
//!
//! GitHub and Gist "human" URLs render an HTML page around the file, not the
//! file itself. These helpers rewrite them to the raw-content hosts so the
//! fetch gets markdown instead of HTML. Everything here is best-effort:
//! input that does not match the expected shape, including input that does
//! not parse at all, comes back unchanged.

use tracing::{debug, warn};
use url::Url;

use crate::types::TokenStripResult;

/// Rewrite a GitHub blob URL to its raw-content equivalent.
///
/// `https://github.com/<owner>/<repo>/blob/<ref>/<path>` becomes
/// `https://raw.githubusercontent.com/<owner>/<repo>/<ref>/<path>`. Path
/// segments are carried exactly as the parser holds them, percent-encoded,
/// so already-encoded input is not encoded twice and raw non-ASCII segments
/// are encoded once. Anything else, including tree and release URLs or other
/// hosts entirely, passes through unchanged.
#[must_use]
pub fn normalize_github_content_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if parsed.host_str() != Some("github.com") {
        return url.to_string();
    }
    match path_parts(&parsed).as_slice() {
        [owner, repo, "blob", git_ref, file @ ..]
            if !owner.is_empty() && !repo.is_empty() && !git_ref.is_empty() && !file.is_empty() =>
        {
            let mut raw_url =
                format!("https://raw.githubusercontent.com/{owner}/{repo}/{git_ref}");
            for segment in file {
                raw_url.push('/');
                raw_url.push_str(segment);
            }
            debug!(from = url, to = %raw_url, "rewrote GitHub blob URL to raw host");
            raw_url
        }
        _ => url.to_string(),
    }
}

/// Rewrite a Gist page URL to its raw-content equivalent.
///
/// `https://gist.github.com/<owner>/<id>` becomes
/// `https://gist.githubusercontent.com/<owner>/<id>/raw`, which serves the
/// gist's single file; with a trailing `/<file>` segment the file name is
/// appended after `/raw`. Non-matching input passes through unchanged.
#[must_use]
pub fn normalize_gist_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if parsed.host_str() != Some("gist.github.com") {
        return url.to_string();
    }
    match path_parts(&parsed).as_slice() {
        [owner, id] if !owner.is_empty() && !id.is_empty() => {
            let raw_url = format!("https://gist.githubusercontent.com/{owner}/{id}/raw");
            debug!(from = url, to = %raw_url, "rewrote Gist URL to raw host");
            raw_url
        }
        [owner, id, file] if !owner.is_empty() && !id.is_empty() && !file.is_empty() => {
            let raw_url =
                format!("https://gist.githubusercontent.com/{owner}/{id}/raw/{file}");
            debug!(from = url, to = %raw_url, "rewrote Gist URL to raw host");
            raw_url
        }
        _ => url.to_string(),
    }
}

/// Remove a `token` query parameter from a `raw.githubusercontent.com` URL.
///
/// GitHub appends `?token=...` to raw URLs for files in private repos. The
/// token is a short-lived credential; forwarding it into history entries,
/// bookmarks, or logs would leak it, so it is dropped before the URL is used
/// anywhere. Only the exact key `token` is removed, only on that host:
/// `gist.githubusercontent.com` raw URLs embed their access in the path and
/// are left alone, as is any other host that happens to use the same
/// parameter name for its own purposes. Remaining parameters keep their
/// original order and encoding. Unparsable input passes through with
/// `had_token` false.
#[must_use]
pub fn strip_github_token(url: &str) -> TokenStripResult {
    let unchanged = || TokenStripResult {
        clean_url: url.to_string(),
        had_token: false,
    };

    let Ok(mut parsed) = Url::parse(url) else {
        return unchanged();
    };
    if parsed.host_str() != Some("raw.githubusercontent.com") {
        return unchanged();
    }
    let Some(query) = parsed.query().map(str::to_owned) else {
        return unchanged();
    };

    let mut kept: Vec<&str> = Vec::new();
    let mut had_token = false;
    for pair in query.split('&') {
        // A bare `token` with no `=` still counts.
        let key = pair.split('=').next().unwrap_or(pair);
        if key == "token" {
            had_token = true;
        } else {
            kept.push(pair);
        }
    }
    if !had_token {
        return unchanged();
    }

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.set_query(Some(&kept.join("&")));
    }
    warn!(url = %parsed, "removed access token from raw GitHub URL");
    TokenStripResult {
        clean_url: parsed.to_string(),
        had_token: true,
    }
}

/// Path segments with a single trailing empty segment (from a trailing
/// slash) dropped.
fn path_parts(parsed: &Url) -> Vec<&str> {
    let mut parts: Vec<&str> = parsed
        .path_segments()
        .map(Iterator::collect)
        .unwrap_or_default();
    if parts.last() == Some(&"") {
        parts.pop();
    }
    parts
}
