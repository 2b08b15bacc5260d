use tracing::debug;
use url::Url;

use crate::{AnalysisError, ParameterMap, UrlError};

pub(crate) const DEFAULT_SCHEME: &str = "https";

/// Parse `raw_url` into its query parameters.
///
/// URLs written without a scheme (`example.com/landing?utm_source=x`) are
/// parsed as `https://`. Parameter names keep their case, values are
/// lowercased, and a repeated name keeps its last value.
///
/// # Errors
///
/// Returns [`UrlError::Malformed`] if the string is not a URL even after the
/// default scheme is applied.
pub fn extract_parameters(raw_url: &str) -> Result<ParameterMap, UrlError> {
    extract_parameters_with(raw_url, DEFAULT_SCHEME)
}

/// [`extract_parameters`] with an explicit default scheme.
///
/// # Errors
///
/// Returns [`UrlError::Malformed`] if the string cannot be parsed.
pub fn extract_parameters_with(
    raw_url: &str,
    default_scheme: &str,
) -> Result<ParameterMap, UrlError> {
    let url = parse_url(raw_url, default_scheme)?;
    let params: ParameterMap = url.query_pairs().collect();
    debug!(url = raw_url, count = params.len(), "extracted query parameters");
    Ok(params)
}

/// Extraction that stops as soon as more than `limit` distinct names have
/// been seen, so an oversized query is rejected without being read in full.
pub(crate) fn extract_parameters_limited(
    raw_url: &str,
    default_scheme: &str,
    limit: Option<usize>,
) -> Result<ParameterMap, AnalysisError> {
    let Some(limit) = limit else {
        return Ok(extract_parameters_with(raw_url, default_scheme)?);
    };

    let url = parse_url(raw_url, default_scheme)?;
    let mut params = ParameterMap::new();
    for (name, value) in url.query_pairs() {
        params.insert(name, &value);
        if params.len() > limit {
            debug!(url = raw_url, limit, "query parameter limit exceeded");
            return Err(AnalysisError::TooManyParameters {
                count: params.len(),
                limit,
            });
        }
    }
    debug!(url = raw_url, count = params.len(), "extracted query parameters");
    Ok(params)
}

/// Rebuild `raw_url` with its query parameters sorted by name and all values
/// lowercased.
///
/// Only meant for comparing two URLs for equivalence; the order of
/// [`extract_parameters`] is always the original query-string order.
/// Normalizing an already normalized URL returns it unchanged.
///
/// # Errors
///
/// Returns [`UrlError::Malformed`] if the string cannot be parsed.
pub fn normalize_url(raw_url: &str) -> Result<String, UrlError> {
    let mut url = parse_url(raw_url, DEFAULT_SCHEME)?;

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.to_lowercase()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    Ok(url.to_string())
}

/// Whether two URL strings normalize to the same URL. Strings that cannot be
/// parsed are only equivalent when they are identical.
#[must_use]
pub fn urls_equivalent(a: &str, b: &str) -> bool {
    match (normalize_url(a), normalize_url(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub(crate) fn parse_url(raw_url: &str, default_scheme: &str) -> Result<Url, UrlError> {
    let trimmed = raw_url.trim();
    let candidate = if scheme_end(trimmed).is_some() {
        trimmed.to_owned()
    } else {
        format!("{default_scheme}://{trimmed}")
    };
    Url::parse(&candidate).map_err(|e| UrlError::Malformed {
        url: raw_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Byte offset just past a leading `scheme://`, if the string starts with one.
///
/// A `://` that appears after the authority (for instance inside a query
/// value such as `?next=https://a.com`) does not count.
fn scheme_end(url: &str) -> Option<usize> {
    let colon = url.find(':')?;
    let scheme = &url[..colon];
    let mut chars = scheme.chars();
    let leading_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let scheme_chars = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (leading_alpha && scheme_chars && url[colon..].starts_with("://")).then_some(colon + 3)
}
