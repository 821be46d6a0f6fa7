//! HTTP retrieval for URLs that passed the admission policy.
//!
//! The client enforces the configured timeout, redirect hop limit, and body
//! size cap. Redirects to plain HTTP are refused rather than followed, so a
//! compromised or misconfigured server cannot downgrade a request that
//! started on HTTPS. Under the insecure override, plain-HTTP hops stay
//! confined to loopback hosts.

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, redirect};
use tracing::debug;
use url::Url;

use mdview_types::is_markdown_content_type;

use crate::is_loopback_host;
use crate::types::{LoadConfig, LoadError};

/// The response pieces the pipeline consumes.
pub(crate) struct FetchedBody {
    pub final_url: Url,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Issue the GET and collect the body, honoring every configured limit.
pub(crate) async fn fetch_markdown(
    url: &Url,
    config: &LoadConfig,
) -> Result<FetchedBody, LoadError> {
    let client = build_client(config)?;
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|error| classify_request_error(error, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    if !is_markdown_content_type(content_type.as_deref()) {
        return Err(LoadError::UnsupportedContentType {
            content_type: content_type.unwrap_or_default(),
        });
    }

    let max_bytes = config.max_body_bytes();
    if let Some(declared) = response.content_length()
        && declared > max_bytes
    {
        return Err(LoadError::BodyTooLarge { max_bytes });
    }

    // The declared length is advisory; enforce the cap on the stream too.
    let final_url = response.url().clone();
    let mut body: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|error| classify_request_error(error, config))?;
        if body.len() as u64 + chunk.len() as u64 > max_bytes {
            return Err(LoadError::BodyTooLarge { max_bytes });
        }
        body.extend_from_slice(&chunk);
    }
    debug!(url = %final_url, bytes = body.len(), "fetched markdown body");

    Ok(FetchedBody {
        final_url,
        content_type,
        body,
    })
}

fn build_client(config: &LoadConfig) -> Result<Client, LoadError> {
    Client::builder()
        .user_agent(config.user_agent())
        .timeout(config.timeout())
        .redirect(redirect_policy(config))
        .build()
        .map_err(LoadError::Network)
}

fn redirect_policy(config: &LoadConfig) -> redirect::Policy {
    let limit = config.max_redirects() as usize;
    let allow_insecure = config.allow_insecure_http;
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > limit {
            return attempt.error("redirect hop limit exceeded");
        }
        if redirect_target_allowed(attempt.url(), allow_insecure) {
            attempt.follow()
        } else {
            // Surface the 3xx response instead of following off policy.
            attempt.stop()
        }
    })
}

/// Whether a redirect may proceed to `target`. HTTPS may go anywhere; plain
/// HTTP is followed only under the insecure override, and only to another
/// loopback host, so a local dev server cannot bounce the client out to an
/// arbitrary unencrypted origin.
fn redirect_target_allowed(target: &Url, allow_insecure: bool) -> bool {
    target.scheme() == "https" || (allow_insecure && is_loopback_host(target))
}

fn classify_request_error(error: reqwest::Error, config: &LoadConfig) -> LoadError {
    if error.is_timeout() {
        LoadError::Timeout(config.timeout())
    } else if error.is_redirect() {
        LoadError::RedirectLimit {
            limit: config.max_redirects(),
        }
    } else {
        LoadError::Network(error)
    }
}

#[cfg(test)]
mod tests {
    use super::redirect_target_allowed;
    use url::Url;

    fn target(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn https_targets_are_always_allowed() {
        assert!(redirect_target_allowed(
            &target("https://example.com/doc.md"),
            false
        ));
        assert!(redirect_target_allowed(
            &target("https://example.com/doc.md"),
            true
        ));
    }

    #[test]
    fn http_targets_are_refused_by_default() {
        assert!(!redirect_target_allowed(
            &target("http://example.com/doc.md"),
            false
        ));
        assert!(!redirect_target_allowed(
            &target("http://127.0.0.1:8080/doc.md"),
            false
        ));
    }

    #[test]
    fn insecure_override_reaches_loopback_only() {
        assert!(redirect_target_allowed(
            &target("http://127.0.0.1:8080/doc.md"),
            true
        ));
        assert!(redirect_target_allowed(&target("http://[::1]/doc.md"), true));
        assert!(redirect_target_allowed(
            &target("http://localhost/doc.md"),
            true
        ));
        assert!(!redirect_target_allowed(
            &target("http://example.com/doc.md"),
            true
        ));
        assert!(!redirect_target_allowed(
            &target("http://192.0.2.7/doc.md"),
            true
        ));
    }
}
