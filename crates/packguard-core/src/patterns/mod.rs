//! Forbidden pattern catalogs.
//!
//! A catalog is an ordered list of labelled matchers. Two catalogs ship with
//! the verifier: one for packaged *paths* and one for source *content*. Both
//! are declared as `&'static` tables of [`PatternSpec`] and compiled into a
//! [`PatternCatalog`] at the start of a run.

pub mod catalog;
pub mod matcher;

pub use catalog::CONTENT_PATTERNS;
pub use catalog::ForbiddenPattern;
pub use catalog::PATH_PATTERNS;
pub use catalog::PatternCatalog;
pub use catalog::PatternScope;
pub use catalog::PatternSpec;
pub use matcher::Matcher;
pub use matcher::MatcherKind;
pub use matcher::PatternMatcher;
