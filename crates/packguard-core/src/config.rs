//! Verification configuration.

use crate::patterns::CONTENT_PATTERNS;
use crate::patterns::PATH_PATTERNS;
use crate::patterns::PatternSpec;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::path::{self};

/// Relative location of the build-output manifest.
pub const DEFAULT_MANIFEST_PATH: &str = "dist-cjs/package.json";

/// Module type the build-output manifest must declare.
pub const DEFAULT_MODULE_TYPE: &str = "commonjs";

/// External packaging command invoked for the dry-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackCommand {
    /// Executable to run.
    pub program: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
    /// Directory the command runs in.
    pub working_dir: PathBuf,
}

impl PackCommand {
    /// `npm pack --dry-run --json --ignore-scripts` with a cache isolated under
    /// `<root>/.npm-cache/packcheck`.
    ///
    /// A relative `root` is resolved against the current directory, so the
    /// cache path stays correct once the command runs inside `root`.
    ///
    /// # Examples
    ///
    /// ```
    /// use packguard_core::PackCommand;
    ///
    /// let cmd = PackCommand::npm("/work/pkg");
    /// assert_eq!(cmd.program, "npm");
    /// assert!(cmd.args.contains(&"--dry-run".to_string()));
    /// ```
    #[must_use]
    pub fn npm(root: impl AsRef<Path>) -> Self {
        let root = path::absolute(root.as_ref()).unwrap_or_else(|_| root.as_ref().to_path_buf());
        let cache_dir = root.join(".npm-cache").join("packcheck");
        Self {
            program: "npm".to_string(),
            args: vec![
                "pack".to_string(),
                "--dry-run".to_string(),
                "--json".to_string(),
                "--ignore-scripts".to_string(),
                "--cache".to_string(),
                cache_dir.display().to_string(),
            ],
            working_dir: root,
        }
    }
}

impl fmt::Display for PackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Configuration for a verification run.
///
/// Paths in `manifest_path`, `required_paths` and `content_roots` are relative
/// to `project_root` and use forward slashes, the way the packaging tool
/// reports them.
///
/// # Examples
///
/// ```
/// use packguard_core::VerifyConfig;
///
/// let mut config = VerifyConfig::for_project("/work/pkg");
/// config.content_roots.push("scripts".to_string());
/// assert_eq!(config.manifest_path, "dist-cjs/package.json");
/// ```
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Directory holding the package being verified.
    pub project_root: PathBuf,

    /// Build-output manifest that must exist and declare the module type.
    pub manifest_path: String,

    /// Required value of the manifest's `type` field.
    pub expected_module_type: String,

    /// Paths that must appear in the dry-run file list.
    pub required_paths: Vec<String>,

    /// Top-level directories whose contents are scanned, in order.
    pub content_roots: Vec<String>,

    /// File extensions (without the dot) whose contents are scanned.
    pub content_extensions: Vec<String>,

    /// Directory names pruned from the content walk.
    pub excluded_dirs: Vec<String>,

    /// Forbidden path catalog, in match order.
    pub path_patterns: Vec<PatternSpec>,

    /// Forbidden content catalog, in match order.
    pub content_patterns: Vec<PatternSpec>,

    /// Packaging dry-run command.
    pub pack: PackCommand,
}

impl Default for VerifyConfig {
    /// Configuration rooted at the current directory.
    fn default() -> Self {
        Self::for_project(".")
    }
}

impl VerifyConfig {
    /// Creates the shipped configuration for the package at `root`.
    ///
    /// Default values:
    /// - `manifest_path`: `dist-cjs/package.json`
    /// - `expected_module_type`: `commonjs`
    /// - `required_paths`: `["dist-cjs/package.json"]`
    /// - `content_roots`: `["src", "tests", "demo"]`
    /// - `content_extensions`: `ts tsx js mjs cjs json`
    /// - `excluded_dirs`: `node_modules dist dist-cjs`
    #[must_use]
    pub fn for_project(root: impl Into<PathBuf>) -> Self {
        let project_root = root.into();
        let pack = PackCommand::npm(&project_root);
        Self {
            project_root,
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            expected_module_type: DEFAULT_MODULE_TYPE.to_string(),
            required_paths: vec![DEFAULT_MANIFEST_PATH.to_string()],
            content_roots: strings(&["src", "tests", "demo"]),
            content_extensions: strings(&["ts", "tsx", "js", "mjs", "cjs", "json"]),
            excluded_dirs: strings(&["node_modules", "dist", "dist-cjs"]),
            path_patterns: PATH_PATTERNS.to_vec(),
            content_patterns: CONTENT_PATTERNS.to_vec(),
            pack,
        }
    }

    /// Absolute location of the build-output manifest.
    #[must_use]
    pub fn manifest_file(&self) -> PathBuf {
        self.project_root.join(&self.manifest_path)
    }

    /// Returns `true` if a directory with this name is pruned from the walk.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &OsStr) -> bool {
        name.to_str()
            .is_some_and(|name| self.excluded_dirs.iter().any(|d| d == name))
    }

    /// Returns `true` if the file's extension is in the allow-list.
    ///
    /// # Examples
    ///
    /// ```
    /// use packguard_core::VerifyConfig;
    /// use std::path::Path;
    ///
    /// let config = VerifyConfig::default();
    /// assert!(config.has_scanned_extension(Path::new("src/index.ts")));
    /// assert!(!config.has_scanned_extension(Path::new("src/logo.svg")));
    /// assert!(!config.has_scanned_extension(Path::new("src/.json")));
    /// ```
    #[must_use]
    pub fn has_scanned_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.content_extensions.iter().any(|e| e == ext))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_shipped_values() {
        let config = VerifyConfig::for_project("/pkg");
        assert_eq!(config.required_paths, vec!["dist-cjs/package.json"]);
        assert_eq!(config.content_roots, vec!["src", "tests", "demo"]);
        assert_eq!(config.path_patterns.len(), 5);
        assert_eq!(config.content_patterns.len(), 5);
        assert_eq!(config.manifest_file(), Path::new("/pkg/dist-cjs/package.json"));
    }

    #[test]
    fn test_excluded_dirs() {
        let config = VerifyConfig::default();
        assert!(config.is_excluded_dir(OsStr::new("node_modules")));
        assert!(config.is_excluded_dir(OsStr::new("dist-cjs")));
        assert!(!config.is_excluded_dir(OsStr::new("distribution")));
    }

    #[test]
    fn test_extension_match_is_exact() {
        let config = VerifyConfig::default();
        assert!(config.has_scanned_extension(Path::new("a/b.cjs")));
        assert!(config.has_scanned_extension(Path::new(".eslintrc.json")));
        assert!(!config.has_scanned_extension(Path::new("a/b.TS")));
        assert!(!config.has_scanned_extension(Path::new("README")));
    }

    #[test]
    #[cfg(unix)]
    fn test_pack_command_display() {
        let cmd = PackCommand::npm("/pkg");
        assert_eq!(
            cmd.to_string(),
            "npm pack --dry-run --json --ignore-scripts --cache /pkg/.npm-cache/packcheck"
        );
        assert_eq!(cmd.working_dir, Path::new("/pkg"));
    }

    #[test]
    fn test_pack_command_relative_root_is_absolute() {
        let cmd = PackCommand::npm("pkg");
        assert!(cmd.working_dir.is_absolute());
        assert!(cmd.working_dir.ends_with("pkg"));

        let cache = cmd.args.last().unwrap();
        assert_eq!(
            Path::new(cache),
            cmd.working_dir.join(".npm-cache").join("packcheck")
        );
    }
}
