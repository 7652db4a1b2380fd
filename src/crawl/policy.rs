// src/crawl/policy.rs
// =============================================================================
// This module decides which discovered links are worth crawling.
//
// A link must pass ALL of these checks to enter the frontier:
// 1. It parses as a URL at all (malformed links are silently skipped)
// 2. Its scheme is http or https (no mailto:, javascript:, file:, ...)
// 3. Its hostname exactly matches the allowed domain (no subdomains!)
// 4. Its path ends with an allow-listed suffix (default: .html / .htm)
// 5. No exclusion rule matches it at the depth it would be enqueued
//
// The exclusion rules exist because real sites have pages you never want
// (think giant auto-generated index pages). A rule is a substring match,
// optionally restricted to one enqueue depth - e.g. "Index.html@1" skips
// links containing "Index.html" only when they would land at depth 1.
//
// Rust concepts:
// - Option<usize>: "at every depth" vs "only at this depth"
// - FromStr: Parsing "pattern@depth" strings from the command line
// =============================================================================

use std::str::FromStr;

use url::Url;

// One exclusion rule: skip links containing `pattern`
//
// When at_depth is Some(n), the rule only applies to links that would be
// enqueued at depth n. When None, it applies everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeRule {
    pub pattern: String,
    pub at_depth: Option<usize>,
}

impl ExcludeRule {
    // Does this rule reject a link that would be enqueued at `depth`?
    fn matches(&self, url: &str, depth: usize) -> bool {
        if let Some(rule_depth) = self.at_depth {
            if rule_depth != depth {
                return false;
            }
        }
        url.contains(&self.pattern)
    }
}

// Parses "PATTERN" or "PATTERN@DEPTH" (the CLI syntax for --exclude)
//
// Examples:
//   "Index.html"   -> skip everywhere
//   "Index.html@1" -> skip only when enqueued at depth 1
impl FromStr for ExcludeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('@') {
            Some((pattern, depth)) => {
                if pattern.is_empty() {
                    return Err(format!("empty pattern in exclude rule '{}'", s));
                }
                let at_depth = depth
                    .parse::<usize>()
                    .map_err(|_| format!("invalid depth in exclude rule '{}'", s))?;
                Ok(ExcludeRule {
                    pattern: pattern.to_string(),
                    at_depth: Some(at_depth),
                })
            }
            None => {
                if s.is_empty() {
                    return Err("exclude rule must not be empty".to_string());
                }
                Ok(ExcludeRule {
                    pattern: s.to_string(),
                    at_depth: None,
                })
            }
        }
    }
}

// The full link acceptance policy for a crawl run
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    // Path suffixes we are willing to crawl (lowercase comparison)
    pub allowed_suffixes: Vec<String>,
    // Links matching any of these rules are skipped
    pub exclusions: Vec<ExcludeRule>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            allowed_suffixes: vec![".html".to_string(), ".htm".to_string()],
            exclusions: Vec::new(),
        }
    }
}

impl LinkPolicy {
    // Checks the suffix allow-list and exclusion rules for a parsed link
    //
    // Parameters:
    //   url: the parsed candidate link
    //   depth: the depth the link would be enqueued at
    //
    // The domain check lives in the controller (it needs the run config),
    // this method only covers the policy-owned rules.
    pub fn accepts(&self, url: &Url, depth: usize) -> bool {
        let path = url.path().to_ascii_lowercase();
        let suffix_ok = self
            .allowed_suffixes
            .iter()
            .any(|suffix| path.ends_with(&suffix.to_ascii_lowercase()));
        if !suffix_ok {
            return false;
        }

        let url_str = url.as_str();
        !self
            .exclusions
            .iter()
            .any(|rule| rule.matches(url_str, depth))
    }
}

// Checks whether a link stays on the allowed domain
//
// The comparison is an EXACT hostname match: "docs.x.test" is not "x.test".
// Subdomain wildcarding is deliberately not supported - the crawl is scoped
// to the hostname of the first seed and nothing else.
pub fn is_same_domain(url: &Url, allowed_domain: &str) -> bool {
    url.host_str() == Some(allowed_domain)
}

// Checks whether a URL uses a scheme we can fetch
pub fn is_fetchable_scheme(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is FromStr?
//    - A standard trait for parsing a value out of a string
//    - Implementing it lets clap parse --exclude flags straight into
//      ExcludeRule values, and lets anyone write "Index.html@1".parse()
//
// 2. Why Option<usize> for at_depth?
//    - Some(n) = "only at depth n", None = "at every depth"
//    - An Option models the two cases without a magic sentinel value
//
// 3. What does rsplit_once('@') do?
//    - Splits on the LAST '@' and returns both halves as Some((a, b))
//    - Returns None when there is no '@' at all
//    - Splitting from the right keeps patterns that contain '@' working
//
// 4. Why compare hostnames exactly instead of ends_with(".x.test")?
//    - "docs.x.test" may be run by someone else entirely
//    - The crawl is scoped to ONE host; anything looser silently widens
//      the blast radius of a typo in the seed URL
// -----------------------------------------------------------------------------
