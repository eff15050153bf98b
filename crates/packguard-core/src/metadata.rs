//! Build-output manifest checks and writer.
//!
//! A CommonJS build emits its output under `dist-cjs/` next to an ESM build.
//! Node only treats those files as CommonJS when a nested `package.json`
//! declares `{"type": "commonjs"}`, and only if that file actually ships.

use crate::config::VerifyConfig;
use crate::error::Result;
use crate::error::VerifyError;
use crate::pack::FileList;
use serde_json::Value;
use serde_json::json;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Parsed build-output manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Value of the `type` field.
    pub module_type: String,
    /// The whole parsed document.
    pub raw: Value,
}

/// Reads the manifest at `config.manifest_file()` and checks its `type`.
///
/// # Errors
///
/// - `VerifyError::ManifestMissing` if the file does not exist
/// - `VerifyError::ManifestMalformed` if it is not valid JSON
/// - `VerifyError::ManifestFieldMismatch` if `type` is absent or differs from
///   `config.expected_module_type`
pub fn verify_manifest(config: &VerifyConfig) -> Result<Manifest> {
    let path = config.manifest_file();
    let shown = PathBuf::from(&config.manifest_path);

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(VerifyError::ManifestMissing { path: shown });
        }
        Err(e) => return Err(VerifyError::io(path, e)),
    };

    let raw: Value = serde_json::from_str(&contents).map_err(|source| {
        VerifyError::ManifestMalformed {
            path: shown.clone(),
            source,
        }
    })?;

    match raw.get("type") {
        Some(Value::String(found)) if *found == config.expected_module_type => {
            debug!(manifest = %config.manifest_path, "build metadata ok");
            Ok(Manifest {
                module_type: found.clone(),
                raw,
            })
        }
        other => Err(VerifyError::ManifestFieldMismatch {
            path: shown,
            expected: config.expected_module_type.clone(),
            found: other.map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string)),
        }),
    }
}

/// Fails unless `required` appears verbatim in the file list.
///
/// # Examples
///
/// ```
/// use packguard_core::FileList;
/// use packguard_core::metadata::ensure_required_path;
///
/// let list: FileList = ["dist-cjs/package.json", "dist/index.js"].into_iter().collect();
/// assert!(ensure_required_path(&list, "dist-cjs/package.json").is_ok());
/// assert!(ensure_required_path(&list, "dist-cjs/index.js").is_err());
/// ```
pub fn ensure_required_path(files: &FileList, required: &str) -> Result<()> {
    if files.contains(required) {
        Ok(())
    } else {
        Err(VerifyError::RequiredPathMissing {
            path: required.to_string(),
        })
    }
}

/// Writes `{"type": "<expected_module_type>"}` to the manifest location.
///
/// The output directory must already exist; the manifest is overwritten if
/// present. Returns the path written.
///
/// # Errors
///
/// - `VerifyError::BuildOutputMissing` if the output directory is absent
/// - `VerifyError::Io` if the file cannot be written
pub fn write_manifest(config: &VerifyConfig) -> Result<PathBuf> {
    let path = config.manifest_file();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    if !dir.is_dir() {
        let relative = Path::new(&config.manifest_path)
            .parent()
            .map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
        return Err(VerifyError::BuildOutputMissing { path: relative });
    }

    let document = json!({ "type": config.expected_module_type });
    let mut contents = serde_json::to_string_pretty(&document)
        .map_err(|e| VerifyError::io(&path, e.into()))?;
    contents.push('\n');

    fs::write(&path, contents).map_err(|e| VerifyError::io(&path, e))?;
    debug!(manifest = %path.display(), "wrote build metadata");
    Ok(path)
}
