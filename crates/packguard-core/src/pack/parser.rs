//! File-list extraction from `npm pack --dry-run --json` output.
//!
//! npm mixes log lines with its JSON report, so the payload is recovered by
//! slicing from the first `[` to the last `]`. Everything past that slice is
//! lenient: a payload without a usable `files` array yields an empty list,
//! which the required-path check then rejects.

use crate::error::Result;
use crate::error::VerifyError;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

/// One file the packaging tool would include in the tarball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListEntry {
    /// Forward-slash relative path, as emitted by the tool.
    pub path: String,
}

/// Files in the prospective tarball, in the order the tool emitted them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    entries: Vec<FileListEntry>,
}

impl FileList {
    /// Creates a list from entries.
    #[must_use]
    pub fn new(entries: Vec<FileListEntry>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in emitted order.
    pub fn iter(&self) -> impl Iterator<Item = &FileListEntry> {
        self.entries.iter()
    }

    /// Paths in emitted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Returns `true` if `path` is listed exactly.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths().any(|p| p == path)
    }
}

impl<S: Into<String>> FromIterator<S> for FileList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|path| FileListEntry { path: path.into() })
                .collect(),
        )
    }
}

/// Returns the slice from the first `[` to the last `]`, inclusive.
///
/// # Errors
///
/// `VerifyError::PayloadNotFound` if there is no such pair.
///
/// # Examples
///
/// ```
/// use packguard_core::pack::extract_json_payload;
///
/// let raw = "npm notice\n[{\"files\":[]}]\nnpm notice done";
/// assert_eq!(extract_json_payload(raw).unwrap(), "[{\"files\":[]}]");
/// assert!(extract_json_payload("no payload here").is_err());
/// ```
pub fn extract_json_payload(raw: &str) -> Result<&str> {
    match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if end > start => Ok(&raw[start..=end]),
        _ => Err(VerifyError::PayloadNotFound),
    }
}

/// Parses the raw dry-run output into a file list.
///
/// Expects a JSON array whose first element has a `files` array of
/// `{ "path": ... }` objects.
///
/// # Errors
///
/// - `VerifyError::PayloadNotFound` if no bracketed payload exists
/// - `VerifyError::PayloadMalformed` if the payload is not valid JSON
pub fn parse_pack_output(raw: &str) -> Result<FileList> {
    let payload = extract_json_payload(raw)?;
    let value: Value = serde_json::from_str(payload).map_err(VerifyError::PayloadMalformed)?;

    let Some(files) = value
        .as_array()
        .and_then(|reports| reports.first())
        .and_then(|report| report.get("files"))
        .and_then(Value::as_array)
    else {
        warn!("dry-run payload has no files array; treating file list as empty");
        return Ok(FileList::default());
    };

    let entries: Vec<FileListEntry> = files
        .iter()
        .filter_map(|entry| match FileListEntry::deserialize(entry) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping malformed file-list entry {entry}: {e}");
                None
            }
        })
        .collect();

    debug!(entries = entries.len(), "parsed dry-run file list");
    Ok(FileList::new(entries))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const NPM_OUTPUT: &str = r#"npm notice
npm notice package: @plasius/sharedassets@1.0.0
[
  {
    "id": "@plasius/sharedassets@1.0.0",
    "name": "@plasius/sharedassets",
    "files": [
      { "path": "LICENSE", "size": 1071, "mode": 420 },
      { "path": "dist-cjs/package.json", "size": 25, "mode": 420 },
      { "path": "dist/index.js", "size": 120, "mode": 420 }
    ],
    "entryCount": 3,
    "bundled": []
  }
]
npm notice total files: 3
"#;

    #[test]
    fn test_parse_npm_output_with_noise() {
        let list = parse_pack_output(NPM_OUTPUT).unwrap();
        let paths: Vec<_> = list.paths().collect();
        assert_eq!(paths, ["LICENSE", "dist-cjs/package.json", "dist/index.js"]);
        assert!(list.contains("dist-cjs/package.json"));
        assert!(!list.contains("dist-cjs"));
    }

    #[test]
    fn test_missing_brackets_is_fatal() {
        assert!(matches!(
            parse_pack_output("npm ERR! something broke"),
            Err(VerifyError::PayloadNotFound)
        ));
        assert!(matches!(
            parse_pack_output("] reversed ["),
            Err(VerifyError::PayloadNotFound)
        ));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        assert!(matches!(
            parse_pack_output("[ not json ]"),
            Err(VerifyError::PayloadMalformed(_))
        ));
    }

    #[test]
    fn test_missing_files_field_yields_empty_list() {
        assert!(parse_pack_output("[{}]").unwrap().is_empty());
        assert!(parse_pack_output("[]").unwrap().is_empty());
        assert!(parse_pack_output(r#"[{"files": "nope"}]"#).unwrap().is_empty());
    }

    #[test]
    fn test_entries_without_path_are_skipped() {
        let list = parse_pack_output(r#"[{"files":[{"size":1},{"path":"a.js"}]}]"#).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.contains("a.js"));
    }

    #[test]
    fn test_only_first_report_is_used() {
        let raw = r#"[{"files":[{"path":"a.js"}]},{"files":[{"path":"b.js"}]}]"#;
        let list = parse_pack_output(raw).unwrap();
        assert_eq!(list.paths().collect::<Vec<_>>(), ["a.js"]);
    }

    #[test]
    fn test_from_iterator_preserves_order() {
        let list: FileList = ["b", "a", "c"].into_iter().collect();
        assert_eq!(list.paths().collect::<Vec<_>>(), ["b", "a", "c"]);
    }
}
