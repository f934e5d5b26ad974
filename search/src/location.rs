//! Reading and writing the query parameter in page URLs.

use url::form_urlencoded::byte_serialize;
use url::Url;

/// Parses a page location, resolving bare paths against a placeholder origin.
fn parse(location: &str) -> Option<Url> {
    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").ok()?.join(location).ok()
        }
        Err(e) => {
            tracing::warn!(location, "cannot parse page location: {e}");
            None
        }
    }
}

/// Value of `param` in the location's query string, if non-empty.
pub fn query_param(location: &str, param: &str) -> Option<String> {
    let url = parse(location)?;
    let value = url
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())?;
    (!value.is_empty()).then_some(value)
}

/// The location with `param` set to `value`.
///
/// The first existing occurrence is replaced in place and later duplicates
/// are dropped; otherwise the parameter is appended. Other parameters and
/// the fragment are untouched. Returns `None` if the location is not a URL.
pub fn with_query_param(location: &str, param: &str, value: &str) -> Option<String> {
    let mut url = parse(location)?;
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (key, existing) in url.query_pairs() {
        if key == param {
            if !replaced {
                pairs.push((key.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), existing.into_owned()));
        }
    }
    if !replaced {
        pairs.push((param.to_string(), value.to_string()));
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
    Some(url.to_string())
}

/// Results-page URL carrying `query` in `param`.
pub fn redirect_url(results_path: &str, param: &str, query: &str) -> String {
    let encoded: String = byte_serialize(query.as_bytes()).collect();
    format!("{results_path}?{param}={encoded}")
}
