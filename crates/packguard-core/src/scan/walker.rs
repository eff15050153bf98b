//! Source tree walking with directory pruning.
//!
//! Roots are visited in configuration order. Within a root the walk is
//! depth-first with siblings sorted by file name, so the sequence of files is
//! deterministic for a given tree. Excluded directories are pruned before
//! descent; nothing below them is ever read.

use crate::config::VerifyConfig;
use crate::error::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks the configured content roots and yields files eligible for
/// content scanning.
///
/// # Examples
///
/// ```no_run
/// use packguard_core::VerifyConfig;
/// use packguard_core::scan::SourceWalker;
///
/// let config = VerifyConfig::for_project("./my-package");
/// for file in SourceWalker::new(&config).collect_files()? {
///     println!("would scan {}", file.display());
/// }
/// # Ok::<(), packguard_core::VerifyError>(())
/// ```
pub struct SourceWalker<'a> {
    config: &'a VerifyConfig,
}

impl<'a> SourceWalker<'a> {
    /// Creates a walker over `config.content_roots`.
    #[must_use]
    pub fn new(config: &'a VerifyConfig) -> Self {
        Self { config }
    }

    /// Collects every regular file under the roots whose extension is in the
    /// allow-list. Missing roots are skipped. Symlinks are not followed.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::Walk` if a directory cannot be read.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for root in &self.config.content_roots {
            let dir = self.config.project_root.join(root);
            if !dir.is_dir() {
                debug!(root = %dir.display(), "content root missing, skipping");
                continue;
            }

            let walker = WalkDir::new(&dir)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !self.is_pruned(entry));

            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_file() && self.config.has_scanned_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }

        Ok(files)
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        // The root itself is never pruned, only directories below it.
        let pruned = entry.depth() > 0
            && entry.file_type().is_dir()
            && self.config.is_excluded_dir(entry.file_name());
        if pruned {
            debug!(dir = %entry.path().display(), "pruning excluded directory");
        }
        pruned
    }
}

/// Renders `path` relative to `root` with forward slashes.
///
/// Falls back to the full path when `path` is not under `root`.
///
/// # Examples
///
/// ```
/// use packguard_core::scan::relative_display;
/// use std::path::Path;
///
/// let rel = relative_display(Path::new("/pkg/src/a/b.ts"), Path::new("/pkg"));
/// assert_eq!(rel, "src/a/b.ts");
/// ```
#[must_use]
pub fn relative_display(path: &Path, root: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    parts.join("/")
}
