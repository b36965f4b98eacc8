//! URL canonicalization.
//!
//! Maps every submitted URL onto a single textual form so that semantically
//! equivalent submissions hash identically. The steps run in a fixed order and
//! the output is persisted as the dedup key: changing any step invalidates the
//! dedup guarantee of every previously stored record.

use url::Url;

/// Query parameters dropped during canonicalization (matched case-insensitively).
pub const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
];

/// Scheme prepended when the input carries no `http://` or `https://` prefix.
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Errors that can occur during URL canonicalization.
#[derive(Debug, thiserror::Error)]
pub enum CanonicalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Failed to canonicalize URL: {0}")]
    NormalizationFailed(String),
}

/// Canonicalizes a URL.
///
/// # Rules
///
/// Applied in this order:
///
/// 1. Surrounding whitespace is trimmed
/// 2. `https://` is prepended when no `http://`/`https://` prefix is present
/// 3. The result is parsed; failure is an error
/// 4. **Scheme** is forced to `https`
/// 5. **Hostname** is lowercased
/// 6. **Default port** (443) is removed
/// 7. **Path**: empty or `/` becomes `/`, otherwise one trailing `/` is removed
/// 8. **Query**: tracking parameters are dropped, the rest are stably sorted by key
/// 9. **Fragment** is removed
///
/// # Errors
///
/// Returns [`CanonicalizationError::InvalidFormat`] when the input does not parse
/// as a URL after the default-scheme fallback.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     canonicalize_url("HTTP://Example.com:80/p/?utm_source=x&b=2&a=1#top").unwrap(),
///     "https://example.com/p?a=1&b=2"
/// );
/// ```
pub fn canonicalize_url(input: &str) -> Result<String, CanonicalizationError> {
    let trimmed = input.trim();

    let with_scheme = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let mut url =
        Url::parse(&with_scheme).map_err(|e| CanonicalizationError::InvalidFormat(e.to_string()))?;

    if url.scheme() != "https" {
        url.set_scheme("https").map_err(|_| {
            CanonicalizationError::NormalizationFailed("Failed to force https scheme".to_string())
        })?;
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            CanonicalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    // The scheme is https from here on; `:80` was already dropped by the parser.
    if url.port() == Some(443) {
        url.set_port(None).map_err(|_| {
            CanonicalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    let path = normalize_path(url.path()).to_string();
    url.set_path(&path);

    normalize_query(&mut url);

    url.set_fragment(None);

    Ok(url.into())
}

/// Case-insensitive check for an `http://` or `https://` prefix.
fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

fn normalize_path(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        return "/";
    }

    path.strip_suffix('/').unwrap_or(path)
}

/// Returns true if `key` is a well-known tracking parameter.
pub fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS
        .iter()
        .any(|param| param.eq_ignore_ascii_case(key))
}

fn normalize_query(url: &mut Url) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if pairs.is_empty() {
        url.set_query(None);
        return;
    }

    // Stable: values sharing a key keep their submitted order.
    pairs.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    url.query_pairs_mut().clear().extend_pairs(pairs);
}
