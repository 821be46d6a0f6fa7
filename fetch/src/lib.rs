//! Gated retrieval of remote markdown documents.
//!
//! Remote markdown is untrusted input fetched on the user's behalf, so every
//! URL runs through an admission policy before any request is made: HTTPS
//! only, no embedded credentials, a length guard, and an ASCII-only hostname
//! rule that shuts out homoglyph lookalikes. Accepted GitHub and Gist page
//! URLs are rewritten to their raw-content hosts, leaked access tokens are
//! stripped, and the response is held to a markdown Content-Type allowlist,
//! a size cap, and strict UTF-8.
//!
//! [`load`] runs the whole pipeline; the individual stages are exported for
//! callers that need only the checks.
//!
//! ```no_run
//! # async fn demo() -> Result<(), mdview_fetch::LoadError> {
//! use mdview_fetch::{LoadConfig, load};
//!
//! let config = LoadConfig::default();
//! let doc = load(
//!     "https://github.com/rust-lang/rust/blob/master/README.md",
//!     &config,
//! )
//! .await?;
//! print!("{}", doc.markdown);
//! # Ok(())
//! # }
//! ```

mod http;
mod normalize;
mod policy;
mod types;

pub use normalize::{normalize_gist_url, normalize_github_content_url, strip_github_token};
pub use policy::{MAX_URL_CHARS, check_markdown_url, is_allowed_markdown_url};
pub use types::{
    LoadConfig, LoadError, LoadedDocument, RejectReason, TokenStripResult, UrlVerdict,
};

use tracing::debug;
use url::{Host, Url};

/// Gate, normalize, and fetch a markdown document.
///
/// The pipeline, in order:
///
/// 1. the admission checks of [`check_markdown_url`]; a rejected URL never
///    touches the network
/// 2. GitHub blob and Gist page URLs are rewritten to their raw-content
///    hosts ([`normalize_github_content_url`], [`normalize_gist_url`])
/// 3. a leaked `token` query parameter is stripped
///    ([`strip_github_token`]); [`LoadedDocument::had_token`] reports it so
///    callers can warn that the pasted link carried a credential
/// 4. the fetch itself, under the configured timeout, redirect hop limit,
///    and body size cap; redirects that downgrade to plain HTTP are not
///    followed
/// 5. the response must declare a markdown-like Content-Type (or none at
///    all) and decode as strict UTF-8
///
/// With [`LoadConfig::allow_insecure_http`] set, a plain-HTTP URL is
/// accepted when its host is loopback, and redirect hops are held to the
/// same rule; every other check still applies.
pub async fn load(raw_url: &str, config: &LoadConfig) -> Result<LoadedDocument, LoadError> {
    if let Err(reason) = gate(raw_url, config) {
        policy::log_rejection(raw_url, reason);
        return Err(LoadError::Rejected(reason));
    }

    let normalized = normalize_gist_url(&normalize_github_content_url(raw_url));
    let TokenStripResult {
        clean_url,
        had_token,
    } = strip_github_token(&normalized);

    let url = match Url::parse(&clean_url) {
        Ok(url) => url,
        Err(_) => return Err(LoadError::Rejected(RejectReason::Malformed)),
    };

    let fetched = http::fetch_markdown(&url, config).await?;

    let Ok(markdown) = String::from_utf8(fetched.body) else {
        return Err(LoadError::InvalidUtf8);
    };

    Ok(LoadedDocument {
        requested_url: raw_url.to_string(),
        url: clean_url,
        final_url: canonical_final_url(&fetched.final_url),
        had_token,
        content_type: fetched.content_type,
        markdown,
    })
}

/// Admission decision for [`load`]: the policy verdict plus the
/// insecure-loopback override. Rejection logging stays with the caller, so
/// an overridden URL never leaves a refusal warning behind.
fn gate(raw_url: &str, config: &LoadConfig) -> Result<(), RejectReason> {
    match policy::evaluate(raw_url) {
        UrlVerdict::Allowed => Ok(()),
        UrlVerdict::Rejected(RejectReason::NotHttps)
            if config.allow_insecure_http && is_loopback_http(raw_url) =>
        {
            debug!(url = raw_url, "allowing plain-HTTP loopback URL");
            Ok(())
        }
        UrlVerdict::Rejected(reason) => Err(reason),
    }
}

/// The final URL with any fragment dropped; fragments are client-side state
/// and have no place in a fetch record.
fn canonical_final_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}

/// True for plain-HTTP URLs whose host is loopback. Used by the insecure
/// override, which relaxes only the scheme requirement: credentials remain
/// forbidden even here.
fn is_loopback_http(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    if parsed.scheme() != "http" {
        return false;
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return false;
    }
    is_loopback_host(&parsed)
}

/// True when the URL's host is loopback: `127.0.0.0/8`, `[::1]`, or the
/// literal `localhost`. The parser lowercases domains, so the comparison
/// needs no case folding.
pub(crate) fn is_loopback_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        Some(Host::Domain(domain)) => domain == "localhost",
        None => false,
    }
}
