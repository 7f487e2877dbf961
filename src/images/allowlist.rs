#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPattern {
    /// `*`
    Any,
    Exact(String),
    /// `*.example.com`, stored with its leading dot
    Suffix(String),
}

impl DomainPattern {
    /// `None` for entries that name no host: blanks and a bare `*.`.
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim().to_ascii_lowercase();
        if pattern.is_empty() || pattern == "*." {
            None
        } else if pattern == "*" {
            Some(DomainPattern::Any)
        } else if pattern.starts_with("*.") {
            Some(DomainPattern::Suffix(pattern[1..].to_string()))
        } else {
            Some(DomainPattern::Exact(pattern))
        }
    }

    pub fn matches(&self, origin: &str) -> bool {
        match self {
            DomainPattern::Any => true,
            DomainPattern::Exact(host) => host.eq_ignore_ascii_case(origin),
            DomainPattern::Suffix(suffix) => {
                origin.len() > suffix.len()
                    && origin.to_ascii_lowercase().ends_with(suffix.as_str())
            }
        }
    }
}

/// Remote hosts the gateway is willing to fetch images from.
#[derive(Debug, Clone)]
pub struct DomainAllowlist {
    patterns: Vec<DomainPattern>,
}

impl DomainAllowlist {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|p| DomainPattern::parse(p.as_ref()))
            .collect();
        Self { patterns }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_allows_everything() {
        let allowlist = DomainAllowlist::new(["*"]);
        assert!(allowlist.is_allowed("anything.io"));
        assert!(allowlist.is_allowed("localhost"));
    }

    #[test]
    fn exact_match() {
        let allowlist = DomainAllowlist::new(["example.com"]);
        assert!(allowlist.is_allowed("example.com"));
        assert!(!allowlist.is_allowed("img.example.com"));
        assert!(!allowlist.is_allowed("example.org"));
    }

    #[test]
    fn wildcard_matches_subdomains_on_dot_boundary() {
        let allowlist = DomainAllowlist::new(["*.example.com"]);
        assert!(allowlist.is_allowed("img.example.com"));
        assert!(allowlist.is_allowed("a.b.example.com"));
        assert!(!allowlist.is_allowed("example.com"));
        assert!(!allowlist.is_allowed("notexample.com"));
    }

    #[test]
    fn patterns_are_trimmed_and_case_insensitive() {
        assert_eq!(
            DomainPattern::parse(" Example.COM "),
            Some(DomainPattern::Exact("example.com".to_string()))
        );
        assert_eq!(DomainPattern::parse("  "), None);

        let allowlist = DomainAllowlist::new([" Example.COM ", "", "  "]);
        assert!(allowlist.is_allowed("example.com"));
        assert!(allowlist.is_allowed("EXAMPLE.com"));
    }

    #[test]
    fn no_match_is_rejected() {
        let allowlist = DomainAllowlist::new(["other.com"]);
        assert!(!allowlist.is_allowed("cdn.example.com"));

        let empty = DomainAllowlist::new(Vec::<String>::new());
        assert!(!empty.is_allowed("cdn.example.com"));
    }

    #[test]
    fn bare_wildcard_dot_is_ignored() {
        assert_eq!(DomainPattern::parse("*."), None);
        assert_eq!(DomainPattern::parse(" *. "), None);

        let allowlist = DomainAllowlist::new(["*."]);
        assert!(!allowlist.is_allowed("example.com."));
        assert!(!allowlist.is_allowed("cdn.example.com"));

        let mixed = DomainAllowlist::new(["*.", "*.example.com"]);
        assert!(mixed.is_allowed("cdn.example.com"));
        assert!(!mixed.is_allowed("host.evil."));
    }

    #[test]
    fn combined_patterns() {
        let allowlist = DomainAllowlist::new(["example.com", "*.example.com"]);
        assert!(allowlist.is_allowed("example.com"));
        assert!(allowlist.is_allowed("cdn.example.com"));
        assert!(!allowlist.is_allowed("evil.com"));
    }
}
