//! Parsing of robots.txt documents into a [`Robots`] model.
//!
//! The parser is deliberately lenient: robots.txt files are fetched from
//! arbitrary origins and a crawler must never choke on one. Lines that make
//! no sense produce no directive, unknown directives are skipped, and rules
//! that sit outside any user-agent group are dropped. Parsing cannot fail.

use memchr::{memchr, memchr2};

use crate::agent;
use crate::robots::{Group, Robots, Rule, RuleKind};

/// Certain browsers limit URLs to 2083 bytes, and no sane directive line is
/// more than a few times that. Bytes past this point on a single line are
/// dropped.
const MAX_LINE_LEN: usize = 2083 * 8;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses a robots.txt document. Never fails: malformed input yields an
/// empty or partial model.
///
/// The returned [`Robots`] owns all of its data and does not borrow from
/// `robotstxt`.
pub fn parse(robotstxt: impl AsRef<[u8]>) -> Robots {
    let body = robotstxt.as_ref();
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);

    let mut assembler = Assembler::new();
    for line in lines(body) {
        let Some((key, value)) = split_key_value(line) else {
            continue;
        };
        match classify(key) {
            Directive::UserAgent => assembler.user_agent(value),
            Directive::Allow => assembler.rule(RuleKind::Allow, escape_pattern(value)),
            Directive::Disallow => assembler.rule(RuleKind::Disallow, escape_pattern(value)),
            Directive::Sitemap => assembler.sitemap(value),
            Directive::Unknown => {}
        }
    }
    assembler.finish()
}

/// Splits `body` into logical lines. Any of `\n`, `\r`, or `\r\n` ends a
/// line, and a trailing unterminated line still counts. Lines are capped at
/// [`MAX_LINE_LEN`] bytes; the excess is silently discarded.
fn lines(body: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = body;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let line = match memchr2(b'\r', b'\n', rest) {
            Some(end) => {
                let line = &rest[..end];
                let terminator = if rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                rest = &rest[end + terminator..];
                line
            }
            None => {
                let line = rest;
                rest = &rest[rest.len()..];
                line
            }
        };
        Some(&line[..line.len().min(MAX_LINE_LEN)])
    })
}

/// Splits one line into a trimmed key/value pair. Comments run from `#` to
/// the end of the line and are dropped first. The separator is `:`, but a
/// missing colon is forgiven when whitespace can stand in for it, since
/// `disallow /x` is unambiguous. Returns `None` for blank lines and lines
/// with no separator or no key.
fn split_key_value(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let line = match memchr(b'#', line) {
        Some(comment) => &line[..comment],
        None => line,
    };
    let line = trim(line);
    if line.is_empty() {
        return None;
    }

    let (key, value) = match memchr(b':', line) {
        Some(sep) => (&line[..sep], &line[sep + 1..]),
        None => {
            let sep = line.iter().position(|&b| b == b' ' || b == b'\t')?;
            (&line[..sep], &line[sep + 1..])
        }
    };

    let key = trim(key);
    if key.is_empty() {
        return None;
    }
    Some((key, trim(value)))
}

fn trim(mut bytes: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b' ' | b'\t'] = bytes {
        bytes = rest;
    }
    bytes
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Directive {
    UserAgent,
    Allow,
    Disallow,
    Sitemap,
    Unknown,
}

// Accepted spellings per directive. Webmasters misspell `disallow` often
// enough that the common typos are worth honoring.
const USER_AGENT_KEYS: &[&str] = &["user-agent", "useragent", "user agent"];
const ALLOW_KEYS: &[&str] = &["allow"];
const DISALLOW_KEYS: &[&str] = &[
    "disallow", "dissallow", "dissalow", "disalow", "diasllow", "disallaw",
];
const SITEMAP_KEYS: &[&str] = &["sitemap", "site-map"];

/// Maps a key to its directive. Keys match on a case-insensitive prefix, so
/// trailing junk after a recognized name does not hide the directive.
fn classify(key: &[u8]) -> Directive {
    let matches_any =
        |names: &[&str]| names.iter().any(|name| starts_with_ignore_case(key, name));
    if matches_any(USER_AGENT_KEYS) {
        Directive::UserAgent
    } else if matches_any(ALLOW_KEYS) {
        Directive::Allow
    } else if matches_any(DISALLOW_KEYS) {
        Directive::Disallow
    } else if matches_any(SITEMAP_KEYS) {
        Directive::Sitemap
    } else {
        Directive::Unknown
    }
}

fn starts_with_ignore_case(key: &[u8], name: &str) -> bool {
    let name = name.as_bytes();
    key.len() >= name.len() && key[..name.len()].eq_ignore_ascii_case(name)
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Canonicalizes an allow/disallow value so that rule patterns and
/// percent-encoded request paths compare byte for byte: every byte outside
/// the ASCII range becomes `%HH` with uppercase hex, and existing `%hh`
/// escapes have their digits uppercased. `/SanJosé` and `/SanJos%c3%a9`
/// both come out as `/SanJos%C3%A9`.
fn escape_pattern(value: &[u8]) -> String {
    let mut pattern = String::with_capacity(value.len());
    let mut i = 0;
    while i < value.len() {
        match value[i] {
            b'%' if i + 2 < value.len()
                && value[i + 1].is_ascii_hexdigit()
                && value[i + 2].is_ascii_hexdigit() =>
            {
                pattern.push('%');
                pattern.push(value[i + 1].to_ascii_uppercase() as char);
                pattern.push(value[i + 2].to_ascii_uppercase() as char);
                i += 3;
            }
            byte if byte >= 0x80 => {
                pattern.push('%');
                pattern.push(HEX_DIGITS[(byte >> 4) as usize] as char);
                pattern.push(HEX_DIGITS[(byte & 0xf) as usize] as char);
                i += 1;
            }
            byte => {
                pattern.push(byte as char);
                i += 1;
            }
        }
    }
    pattern
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// No group is open; allow/disallow lines here belong to nobody.
    SeekingAgent,
    /// User-agent lines are accumulating onto the current group.
    CollectingAgents,
    /// The current group's agent list is closed; rules are accumulating.
    CollectingRules,
}

/// Folds the directive stream into groups. A run of user-agent lines opens
/// a group (blank and unrecognized lines in between do not break the run);
/// the first allow/disallow closes its agent list; a later user-agent line
/// starts the next group.
struct Assembler {
    state: State,
    current: Group,
    groups: Vec<Group>,
    sitemaps: Vec<String>,
}

impl Assembler {
    fn new() -> Self {
        Self {
            state: State::SeekingAgent,
            current: Group::default(),
            groups: Vec::new(),
            sitemaps: Vec::new(),
        }
    }

    fn user_agent(&mut self, value: &[u8]) {
        if self.state != State::CollectingAgents {
            self.finalize_current();
            self.state = State::CollectingAgents;
        }
        let name = agent::normalize(&String::from_utf8_lossy(value));
        if !name.is_empty() && !self.current.agents.contains(&name) {
            self.current.agents.push(name);
        }
    }

    fn rule(&mut self, kind: RuleKind, pattern: String) {
        if self.state == State::SeekingAgent {
            return;
        }
        self.state = State::CollectingRules;
        self.current.rules.push(Rule { kind, pattern });
    }

    fn sitemap(&mut self, value: &[u8]) {
        self.sitemaps
            .push(String::from_utf8_lossy(value).into_owned());
    }

    /// Closes the current group. A group whose user-agent lines were all
    /// empty has nobody to apply to, so it is dropped along with its rules.
    fn finalize_current(&mut self) {
        let group = std::mem::take(&mut self.current);
        if !group.agents.is_empty() {
            self.groups.push(group);
        }
    }

    fn finish(mut self) -> Robots {
        self.finalize_current();
        Robots {
            groups: self.groups,
            sitemaps: self.sitemaps,
        }
    }
}
