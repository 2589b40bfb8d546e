use percent_encoding::percent_decode_str;

/// Canonicalize a route path for storage and lookup.
///
/// The result always starts with a single `/` and never ends with one,
/// except for the root path `/` itself. Applying it twice changes nothing.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_trailing = trimmed.trim_end_matches('/');
    if without_trailing.is_empty() {
        return "/".to_string();
    }

    if without_trailing.starts_with('/') {
        without_trailing.to_string()
    } else {
        format!("/{}", without_trailing)
    }
}

/// Canonicalize an incoming request target.
///
/// Drops the query string and fragment, percent-decodes what is left and
/// then applies [`normalize`].
pub fn normalize_request_path(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    normalize(&decoded)
}
