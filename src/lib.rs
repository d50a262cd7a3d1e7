//! This is a library for parsing [robots.txt](https://en.wikipedia.org/wiki/Robots.txt)
//! files and deciding whether a crawler may fetch a URL. It implements the
//! Google-flavored dialect of the Robots Exclusion Protocol internet draft
//! ([draft-koster-rep](https://tools.ietf.org/html/draft-koster-rep)),
//! including its documented extensions: missing-colon directive lines,
//! common `disallow` misspellings, user-agent truncation at whitespace, the
//! `index.html`-as-directory rule, and the long-line cap.
//!
//! Parsing is deliberately lenient and cannot fail; robots.txt files come
//! from arbitrary origins and must never take a crawler down with them.
//! Matching is longest-match-wins: of all rules whose pattern matches the
//! request path, the longest pattern decides, and an allow/disallow tie
//! resolves to allow.
//!
//! The library performs no network I/O and does not percent-encode URLs;
//! callers are expected to fetch the document and encode non-ASCII URL
//! bytes themselves.
//!
//! ## Example
//! ```
//! use robotstxt::parse;
//!
//! let robots = parse(
//!     "User-Agent: FooBot\n\
//!      Disallow: /private/\n\
//!      Allow: /private/public.html\n",
//! );
//!
//! assert!(robots.is_allowed("FooBot", "https://example.com/index.html"));
//! assert!(!robots.is_allowed("FooBot", "https://example.com/private/page.html"));
//! assert!(robots.is_allowed("FooBot", "https://example.com/private/public.html"));
//! ```

mod agent;
mod parser;
mod pattern;
mod robots;
mod url;

pub use agent::is_valid_user_agent_to_obey;
pub use parser::parse;
pub use robots::{Group, Robots, Rule, RuleKind};

/// Parses `robotstxt` and reports whether `user_agent` may fetch `url` in
/// one call.
///
/// The degenerate inputs short-circuit: an empty document allows everything,
/// an empty user-agent is bound by no group, and an empty URL is never
/// fetchable under a non-empty policy. For repeated queries against the
/// same document, [`parse`] once and call [`Robots::is_allowed`] instead.
pub fn is_user_agent_allowed(robotstxt: impl AsRef<[u8]>, user_agent: &str, url: &str) -> bool {
    let robotstxt = robotstxt.as_ref();
    if robotstxt.is_empty() || user_agent.is_empty() {
        return true;
    }
    if url.is_empty() {
        return false;
    }
    parse(robotstxt).is_allowed(user_agent, url)
}
