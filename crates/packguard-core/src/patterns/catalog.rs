//! Labelled pattern catalogs and the shipped path/content tables.

use crate::error::Result;
use crate::error::VerifyError;
use crate::patterns::matcher::Matcher;
use crate::patterns::matcher::MatcherKind;
use crate::patterns::matcher::PatternMatcher;
use std::borrow::Cow;

/// What a catalog is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternScope {
    /// Paths in the packaged file list.
    Path,
    /// Text of source files.
    Content,
}

/// Uncompiled catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    /// Human-readable name reported with violations.
    pub label: Cow<'static, str>,
    /// How `source` is interpreted.
    pub kind: MatcherKind,
    /// Pattern text.
    pub source: Cow<'static, str>,
}

impl PatternSpec {
    /// Static case-insensitive regex entry.
    #[must_use]
    pub const fn regex(label: &'static str, source: &'static str) -> Self {
        Self {
            label: Cow::Borrowed(label),
            kind: MatcherKind::Regex,
            source: Cow::Borrowed(source),
        }
    }

    /// Static case-sensitive substring entry.
    #[must_use]
    pub const fn literal(label: &'static str, source: &'static str) -> Self {
        Self {
            label: Cow::Borrowed(label),
            kind: MatcherKind::Literal,
            source: Cow::Borrowed(source),
        }
    }

    /// Owned entry, for catalogs extended at runtime.
    #[must_use]
    pub fn owned(label: impl Into<String>, kind: MatcherKind, source: impl Into<String>) -> Self {
        Self {
            label: Cow::Owned(label.into()),
            kind,
            source: Cow::Owned(source.into()),
        }
    }
}

/// Paths that must never be published.
pub const PATH_PATTERNS: &[PatternSpec] = &[
    PatternSpec::regex(
        "private monorepo path",
        r"(?:^|/)plasius-ltd-site(?:/|$)",
    ),
    PatternSpec::regex(
        "private app runtime path",
        r"(?:^|/)(frontend|backend|dashboard|infra)(?:/|$)",
    ),
    PatternSpec::regex(
        "local settings artifact",
        r"(?:^|/)local\.settings(?:\.[^/]+)?\.json$",
    ),
    PatternSpec::regex("azure host artifact", r"(?:^|/)host\.json$"),
    PatternSpec::regex("generated tsp artifact", r"(?:^|/)tsp-output(?:/|$)"),
];

/// Names that must never appear in shipped source.
///
/// Word boundaries are ASCII-only: a non-ASCII letter next to a name is a
/// boundary, so `caféLunari` is still flagged.
pub const CONTENT_PATTERNS: &[PatternSpec] = &[
    PatternSpec::regex(
        "private monorepo reference",
        r"(?-u:\b)plasius-ltd-site(?-u:\b)",
    ),
    PatternSpec::regex(
        "Plasius Ltd private reference",
        r"(?-u:\b)plasius(?:\s+|-)ltd(?-u:\b)",
    ),
    PatternSpec::regex(
        "proprietary PGP artifact reference",
        r"(?-u:\b)pgp[-_a-z0-9]*(?-u:\b)",
    ),
    PatternSpec::regex(
        "proprietary Lunari artifact reference",
        r"(?-u:\b)lunari(?-u:\b)",
    ),
    PatternSpec::regex(
        "proprietary Pixelverse artifact reference",
        r"(?-u:\b)pixelverse(?-u:\b)",
    ),
];

/// A compiled, labelled matcher.
#[derive(Debug, Clone)]
pub struct ForbiddenPattern {
    label: String,
    scope: PatternScope,
    matcher: Matcher,
}

impl ForbiddenPattern {
    /// Compiles a catalog entry for the given scope.
    pub fn compile(spec: &PatternSpec, scope: PatternScope) -> Result<Self> {
        let matcher =
            Matcher::compile(spec.kind, &spec.source).map_err(|source| VerifyError::InvalidPattern {
                label: spec.label.to_string(),
                source,
            })?;
        Ok(Self {
            label: spec.label.to_string(),
            scope,
            matcher,
        })
    }

    /// Label reported with violations.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Scope this pattern was compiled for.
    #[must_use]
    pub const fn scope(&self) -> PatternScope {
        self.scope
    }
}

impl PatternMatcher for ForbiddenPattern {
    fn find(&self, haystack: &str) -> Option<usize> {
        self.matcher.find(haystack)
    }
}

/// Ordered, read-only list of forbidden patterns sharing one scope.
///
/// # Examples
///
/// ```
/// use packguard_core::PatternCatalog;
///
/// let catalog = PatternCatalog::builtin_paths().unwrap();
/// assert!(catalog.matches_any("plasius-ltd-site/readme.md"));
/// assert!(!catalog.matches_any("src/index.ts"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    scope: PatternScope,
    patterns: Vec<ForbiddenPattern>,
}

impl PatternCatalog {
    /// Compiles `specs`, preserving their order.
    pub fn compile(scope: PatternScope, specs: &[PatternSpec]) -> Result<Self> {
        let patterns = specs
            .iter()
            .map(|spec| ForbiddenPattern::compile(spec, scope))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scope, patterns })
    }

    /// The shipped path catalog.
    pub fn builtin_paths() -> Result<Self> {
        Self::compile(PatternScope::Path, PATH_PATTERNS)
    }

    /// The shipped content catalog.
    pub fn builtin_content() -> Result<Self> {
        Self::compile(PatternScope::Content, CONTENT_PATTERNS)
    }

    /// Scope shared by every entry.
    #[must_use]
    pub const fn scope(&self) -> PatternScope {
        self.scope
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ForbiddenPattern> {
        self.patterns.iter()
    }

    /// Returns `true` if any entry matches `text`.
    #[must_use]
    pub fn matches_any(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    /// First entry, in declaration order, that matches `text`, with the
    /// byte offset of its match.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<(&ForbiddenPattern, usize)> {
        self.patterns
            .iter()
            .find_map(|p| p.find(text).map(|offset| (p, offset)))
    }
}
