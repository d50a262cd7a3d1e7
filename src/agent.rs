//! User-agent handling: the normalization applied to both sides of a group
//! lookup, and the stricter validity check crawl authors can run on their
//! own product token.

/// Normalizes a user-agent for group matching: ASCII-lowercased and cut at
/// the first whitespace, so `Foobot Images` and `foobot` compare equal.
/// Returns the empty string for values with nothing before the whitespace.
pub(crate) fn normalize(user_agent: &str) -> String {
    user_agent
        .split(|c: char| c.is_ascii_whitespace())
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Reports whether `user_agent` is a valid product token to obey in a
/// robots.txt file: non-empty and made up entirely of `[A-Za-z_-]` bytes.
///
/// This is a sanity check for crawlers choosing their own identity; group
/// matching itself is deliberately more forgiving and never calls this.
pub fn is_valid_user_agent_to_obey(user_agent: &str) -> bool {
    !user_agent.is_empty()
        && user_agent
            .bytes()
            .all(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("FooBot"), "foobot");
        assert_eq!(normalize("Foobot Images"), "foobot");
        assert_eq!(normalize("Foobot\tImages"), "foobot");
        assert_eq!(normalize("* baz"), "*");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" FooBot"), "");
    }

    #[test]
    fn test_valid_user_agents() {
        assert!(is_valid_user_agent_to_obey("Foobot"));
        assert!(is_valid_user_agent_to_obey("Foobot-Bar"));
        assert!(is_valid_user_agent_to_obey("Foo_Bar"));
    }

    #[test]
    fn test_invalid_user_agents() {
        assert!(!is_valid_user_agent_to_obey(""));
        assert!(!is_valid_user_agent_to_obey("ツ"));
        assert!(!is_valid_user_agent_to_obey("Foobot*"));
        assert!(!is_valid_user_agent_to_obey(" Foobot "));
        assert!(!is_valid_user_agent_to_obey("Foobot/2.1"));
        assert!(!is_valid_user_agent_to_obey("Foobot Bar"));
        assert!(!is_valid_user_agent_to_obey("Foobot7"));
    }
}
