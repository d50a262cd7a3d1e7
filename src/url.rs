//! Extraction of the matchable portion of a URL.
//!
//! Rules only ever see the path, params, and query of a request, so the
//! scheme and authority are stripped before matching. Callers are expected
//! to hand in URLs that are already percent-encoded.

use std::sync::OnceLock;

use regex::Regex;

fn scheme_regex() -> &'static Regex {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap_or_else(|e| panic!("invalid regex: {}", e))
    })
}

/// Returns the part of `url` that rule patterns are matched against: the
/// path plus any params, query, and fragment, always starting with `/`.
///
/// The authority runs from the end of the scheme (or the start of the
/// string, for scheme-less input) to the first `/`, `?`, or `#`. A URL that
/// jumps straight into a query gets a `/` prepended; a URL with no path at
/// all becomes `/`. The empty URL yields the empty path, which no pattern
/// matches.
pub(crate) fn path_params_query(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    // Protocol-relative input: the leading slashes belong to the authority.
    let rest = url.strip_prefix("//").unwrap_or(url);
    let rest = match scheme_regex().find(rest) {
        Some(scheme) => &rest[scheme.end()..],
        None => rest,
    };

    match memchr::memchr3(b'/', b'?', b'#', rest.as_bytes()) {
        Some(start) if rest.as_bytes()[start] == b'/' => rest[start..].to_string(),
        Some(start) => format!("/{}", &rest[start..]),
        None => String::from("/"),
    }
}
