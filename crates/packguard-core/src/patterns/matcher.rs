//! Matcher variants behind a single capability trait.

use regex::Regex;
use regex::RegexBuilder;

/// Anything that can locate a forbidden pattern in text.
pub trait PatternMatcher {
    /// Returns the byte offset of the first match in `haystack`.
    fn find(&self, haystack: &str) -> Option<usize>;

    /// Returns `true` if `haystack` contains a match.
    fn is_match(&self, haystack: &str) -> bool {
        self.find(haystack).is_some()
    }
}

/// How a pattern source string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Plain case-sensitive substring.
    Literal,
    /// Regular expression, compiled case-insensitively.
    Regex,
}

/// A compiled matcher.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-sensitive substring search.
    Literal(String),
    /// Case-insensitive regular expression.
    Regex(Regex),
}

impl Matcher {
    /// Compiles `source` according to `kind`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packguard_core::patterns::Matcher;
    /// use packguard_core::patterns::MatcherKind;
    /// use packguard_core::patterns::PatternMatcher;
    ///
    /// let m = Matcher::compile(MatcherKind::Regex, r"\blunari\b").unwrap();
    /// assert_eq!(m.find("see LUNARI docs"), Some(4));
    ///
    /// let m = Matcher::compile(MatcherKind::Literal, "internal/").unwrap();
    /// assert!(m.is_match("pkg/internal/x.js"));
    /// assert!(!m.is_match("pkg/Internal/x.js"));
    /// ```
    pub fn compile(kind: MatcherKind, source: &str) -> Result<Self, regex::Error> {
        match kind {
            MatcherKind::Literal => Ok(Self::Literal(source.to_string())),
            MatcherKind::Regex => RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map(Self::Regex),
        }
    }
}

impl PatternMatcher for Matcher {
    fn find(&self, haystack: &str) -> Option<usize> {
        match self {
            // An empty needle would flag every input.
            Self::Literal(needle) if needle.is_empty() => None,
            Self::Literal(needle) => haystack.find(needle.as_str()),
            Self::Regex(re) => re.find(haystack).map(|m| m.start()),
        }
    }
}
