//! Forbidden path scanning over the dry-run file list.

use crate::patterns::PatternCatalog;

/// Returns the paths matching any entry of `catalog`, in input order.
///
/// The result does not say which entry matched.
///
/// # Examples
///
/// ```
/// use packguard_core::PatternCatalog;
/// use packguard_core::scan::scan_paths;
///
/// let catalog = PatternCatalog::builtin_paths().unwrap();
/// let flagged = scan_paths(["dist-cjs/package.json", "plasius-ltd-site/x.ts"], &catalog);
/// assert_eq!(flagged, ["plasius-ltd-site/x.ts"]);
/// ```
pub fn scan_paths<I, S>(paths: I, catalog: &PatternCatalog) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .filter(|path| catalog.matches_any(path.as_ref()))
        .map(|path| path.as_ref().to_string())
        .collect()
}
