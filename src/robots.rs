//! The parsed robots.txt model and the verdict logic that runs over it.

use crate::{agent, pattern, url};

/// Whether a rule grants or denies access to the paths its pattern covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    Allow,
    Disallow,
}

/// A single allow or disallow line: the kind plus the canonicalized path
/// pattern it applies to. An empty pattern is legal and matches nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub pattern: String,
}

/// A block of rules governed by one or more user-agent lines. Agent names
/// are stored lowercased and truncated at the first whitespace; the
/// sentinel `*` marks the global group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub agents: Vec<String>,
    pub rules: Vec<Rule>,
}

impl Group {
    /// True if this group applies to crawlers that have no more specific
    /// group of their own.
    pub fn is_global(&self) -> bool {
        self.agents.iter().any(|agent| agent == "*")
    }
}

/// A parsed robots.txt document: groups in source order plus any sitemap
/// URLs encountered along the way.
///
/// Built once by [`crate::parse`] and immutable afterwards, so a single
/// instance can serve queries from many threads at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Robots {
    pub(crate) groups: Vec<Group>,
    pub(crate) sitemaps: Vec<String>,
}

impl Robots {
    /// The user-agent groups of the document, in source order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Sitemap URLs listed anywhere in the document, recorded verbatim.
    /// This crate does not interpret them.
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Returns whether `user_agent` may fetch `url` under this policy.
    ///
    /// The most specific group for the agent is consulted, falling back to
    /// the global `*` group. With no applicable group, or no matching rule
    /// in the chosen group, everything is allowed.
    pub fn is_allowed(&self, user_agent: &str, url: &str) -> bool {
        let path = url::path_params_query(url);
        match self.select_group(user_agent) {
            Some(group) => group_allows(group, &path),
            None => true,
        }
    }

    /// Picks the group governing `user_agent`: the candidate whose agent
    /// name is the longest prefix of the normalized agent wins, with ties
    /// going to the group that appears first. Only when no named agent
    /// matches does the first `*` group apply.
    fn select_group(&self, user_agent: &str) -> Option<&Group> {
        let name = agent::normalize(user_agent);
        if name.is_empty() {
            return None;
        }

        let mut best: Option<(&Group, usize)> = None;
        for group in &self.groups {
            for agent in &group.agents {
                if agent != "*"
                    && name.starts_with(agent.as_str())
                    && best.map_or(true, |(_, len)| agent.len() > len)
                {
                    best = Some((group, agent.len()));
                }
            }
        }
        match best {
            Some((group, _)) => Some(group),
            None => self.groups.iter().find(|group| group.is_global()),
        }
    }
}

/// No-match sentinel, below the priority of any matching rule. A matching
/// empty pattern would score 0, but empty patterns never match, so real
/// priorities start at 1.
const NO_MATCH: i64 = -1;

/// Arbitrates every rule of `group` against `path`: the longest matching
/// pattern decides, and an allow/disallow tie at equal length resolves in
/// the crawler's favor.
fn group_allows(group: &Group, path: &str) -> bool {
    let mut allow = NO_MATCH;
    let mut disallow = NO_MATCH;
    for rule in &group.rules {
        match rule.kind {
            RuleKind::Allow => allow = allow.max(match_allow(&rule.pattern, path)),
            RuleKind::Disallow => disallow = disallow.max(match_priority(&rule.pattern, path)),
        }
    }
    disallow <= allow
}

/// The priority of a matching pattern is its byte length, counting `*` and
/// `$` as one byte each.
fn match_priority(pattern: &str, path: &str) -> i64 {
    if pattern::matches(pattern, path) {
        pattern.len() as i64
    } else {
        NO_MATCH
    }
}

/// Allow rules get a second chance when their pattern names a directory
/// index: `/foo/index.html` also stands for the end-anchored directory
/// `/foo/$`, scored with the full pattern's length.
fn match_allow(pattern: &str, path: &str) -> i64 {
    let priority = match_priority(pattern, path);
    if priority >= 0 {
        return priority;
    }
    if let Some(prefix) = pattern.strip_suffix("index.html") {
        if prefix.ends_with('/') {
            let directory = format!("{prefix}$");
            if pattern::matches(&directory, path) {
                return pattern.len() as i64;
            }
        }
    }
    NO_MATCH
}
