//! Shared types for the markdown load pipeline.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Why a URL was refused by the admission policy.
///
/// Carried inside [`UrlVerdict::Rejected`] and [`LoadError::Rejected`]. The
/// `Display` text is the user-facing message; [`RejectReason::code`] is the
/// stable machine-readable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Scheme is anything other than `https`.
    NotHttps,
    /// The URL embeds userinfo (`user:password@host`).
    HasCredentials,
    /// The raw string exceeds the length guard.
    TooLong,
    /// Not parseable as an absolute URL.
    Malformed,
    /// The hostname contains non-ASCII code points. `homoglyph` is true when
    /// the host mixes Latin with a script whose letters imitate Latin ones,
    /// the shape of a lookalike-domain attack.
    NonAsciiHost {
        /// Whether the host looks like a homoglyph spoof rather than an
        /// ordinary internationalized domain.
        homoglyph: bool,
    },
}

impl RejectReason {
    /// Stable identifier for logs and JSON output.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NotHttps => "not_https",
            Self::HasCredentials => "has_credentials",
            Self::TooLong => "too_long",
            Self::Malformed => "malformed",
            Self::NonAsciiHost { .. } => "non_ascii_host",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotHttps => write!(f, "HTTPS required"),
            Self::HasCredentials => write!(f, "credentials not allowed in URLs"),
            Self::TooLong => write!(f, "URL too long"),
            Self::Malformed => write!(f, "not a valid absolute URL"),
            Self::NonAsciiHost { homoglyph: true } => {
                write!(f, "hostname may contain homoglyphs")
            }
            Self::NonAsciiHost { homoglyph: false } => {
                write!(f, "non-ASCII hostname not allowed")
            }
        }
    }
}

/// Outcome of checking a URL against the admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlVerdict {
    /// The URL may be fetched.
    Allowed,
    /// The URL must not be fetched.
    Rejected(RejectReason),
}

impl UrlVerdict {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn reason(self) -> Option<RejectReason> {
        match self {
            Self::Allowed => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Result of removing a `token` query parameter from a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStripResult {
    /// The URL with the token removed, or the input unchanged when no token
    /// was present (or the input could not be parsed).
    pub clean_url: String,
    /// Whether a `token` parameter was found and removed.
    pub had_token: bool,
}

/// Configuration for [`load`](crate::load).
///
/// All fields are optional; accessor methods fill in the defaults. The struct
/// deserializes directly from the CLI's TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadConfig {
    /// User-Agent header for outbound requests.
    pub user_agent: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_seconds: Option<u32>,
    /// Maximum redirect hops to follow.
    pub max_redirects: Option<u32>,
    /// Maximum response body size in bytes.
    pub max_body_bytes: Option<u64>,
    /// Permit plain-HTTP URLs when the host is loopback. Only the scheme
    /// requirement is relaxed; every other check still applies. Meant for
    /// local servers and tests, never for remote hosts.
    #[serde(default)]
    pub allow_insecure_http: bool,
}

impl LoadConfig {
    pub const DEFAULT_USER_AGENT: &'static str = "mdview/0.1";
    pub const DEFAULT_TIMEOUT_SECONDS: u32 = 15;
    pub const DEFAULT_MAX_REDIRECTS: u32 = 5;
    pub const DEFAULT_MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;

    /// Effective User-Agent, falling back to the default when unset or blank.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .unwrap_or(Self::DEFAULT_USER_AGENT)
    }

    /// Effective whole-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(
            self.timeout_seconds.unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS),
        ))
    }

    /// Effective redirect hop limit.
    #[must_use]
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects.unwrap_or(Self::DEFAULT_MAX_REDIRECTS)
    }

    /// Effective response size cap in bytes.
    #[must_use]
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes.unwrap_or(Self::DEFAULT_MAX_BODY_BYTES)
    }
}

/// A markdown document that passed every gate and was fetched successfully.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The URL exactly as the caller supplied it.
    pub requested_url: String,
    /// The URL actually requested: normalized to a raw-content host where
    /// applicable, with any `token` parameter removed.
    pub url: String,
    /// The URL the response came from after redirects, fragment dropped.
    pub final_url: String,
    /// Whether a `token` query parameter was removed before fetching.
    pub had_token: bool,
    /// The response's declared Content-Type header, if present.
    pub content_type: Option<String>,
    /// The document body.
    pub markdown: String,
}

/// Everything that can go wrong while loading a markdown document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The URL failed the admission policy; nothing was fetched.
    #[error("URL refused: {0}")]
    Rejected(RejectReason),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The redirect chain exceeded the configured hop limit.
    #[error("too many redirects (limit {limit})")]
    RedirectLimit { limit: u32 },

    /// Transport-level failure (DNS, TLS, connection reset, ...).
    #[error("network error")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server responded with HTTP {status}")]
    HttpStatus { status: u16 },

    /// The response declared a Content-Type outside the markdown allowlist.
    #[error("unsupported content type `{content_type}`")]
    UnsupportedContentType { content_type: String },

    /// The response body exceeded the configured size cap.
    #[error("response exceeds the {max_bytes}-byte limit")]
    BodyTooLarge { max_bytes: u64 },

    /// The response body is not valid UTF-8.
    #[error("response body is not valid UTF-8")]
    InvalidUtf8,
}
