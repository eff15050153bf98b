//! Forbidden reference scanning over source file contents.
//!
//! Each file is tested against the content catalog in declaration order and
//! the first matching entry wins, so a file yields at most one violation.

use crate::config::VerifyConfig;
use crate::error::Result;
use crate::error::VerifyError;
use crate::patterns::PatternCatalog;
use crate::report::VerifyProgress;
use crate::report::Violation;
use crate::scan::walker::SourceWalker;
use crate::scan::walker::relative_display;
use std::fs;
use tracing::debug;

/// Result of a content scanning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentScan {
    /// Violations in traversal order, at most one per file.
    pub violations: Vec<Violation>,
    /// Number of files read.
    pub files_scanned: usize,
}

impl ContentScan {
    /// Returns `true` if no file matched.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// 1-based line on which byte `offset` of `text` falls.
///
/// Counts `\n` before the offset, so `\r\n` counts as one break.
///
/// # Examples
///
/// ```
/// use packguard_core::scan::line_number_at;
///
/// assert_eq!(line_number_at("abc", 0), 1);
/// assert_eq!(line_number_at("a\r\nb\nc", 5), 3);
/// ```
#[must_use]
pub fn line_number_at(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Tests `text` against `catalog` and reports the first matching entry.
///
/// # Examples
///
/// ```
/// use packguard_core::PatternCatalog;
/// use packguard_core::scan::scan_text;
///
/// let catalog = PatternCatalog::builtin_content().unwrap();
/// let v = scan_text("src/a.ts", "// ok\nconst x = 'Lunari';\n", &catalog).unwrap();
/// assert_eq!(v.line, 2);
/// assert_eq!(v.label, "proprietary Lunari artifact reference");
/// ```
#[must_use]
pub fn scan_text(file: &str, text: &str, catalog: &PatternCatalog) -> Option<Violation> {
    let (pattern, offset) = catalog.first_match(text)?;
    Some(Violation::new(
        file,
        line_number_at(text, offset),
        pattern.label(),
    ))
}

/// Walks the configured content roots and scans every eligible file.
///
/// File paths in violations are relative to `config.project_root`.
///
/// # Errors
///
/// Returns an error if traversal fails or a file cannot be read.
pub fn scan_sources(
    config: &VerifyConfig,
    catalog: &PatternCatalog,
    progress: &mut dyn VerifyProgress,
) -> Result<ContentScan> {
    let files = SourceWalker::new(config).collect_files()?;
    let mut scan = ContentScan::default();

    for path in &files {
        let bytes = fs::read(path).map_err(|e| VerifyError::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let shown = relative_display(path, &config.project_root);

        if let Some(violation) = scan_text(&shown, &text, catalog) {
            debug!(file = %violation.file, line = violation.line, label = %violation.label, "forbidden reference");
            scan.violations.push(violation);
        }

        scan.files_scanned += 1;
        progress.on_file_scanned(path);
    }

    Ok(scan)
}
