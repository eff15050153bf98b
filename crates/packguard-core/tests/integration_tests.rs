//! Integration tests for packguard-core.
//!
//! These tests build real package trees on disk and replay captured
//! `npm pack --dry-run --json` output through the full pipeline.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use packguard_core::CapturedOutput;
use packguard_core::FailureCategory;
use packguard_core::NoopProgress;
use packguard_core::VerificationOutcome;
use packguard_core::VerifyConfig;
use packguard_core::VerifyError;
use packguard_core::Violation;
use packguard_core::verify_package;
use packguard_core::write_manifest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Package {
    dir: TempDir,
}

impl Package {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn with_manifest(self, contents: &str) -> Self {
        self.file("dist-cjs/package.json", contents)
    }

    fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn verify(&self, packed: &[&str]) -> VerificationOutcome {
        let config = VerifyConfig::for_project(self.root());
        verify_package(&config, &npm_output(packed), &mut NoopProgress)
    }
}

/// Mimics npm 10 output: notices around a pretty-printed JSON report.
fn npm_output(paths: &[&str]) -> CapturedOutput {
    let files: Vec<_> = paths
        .iter()
        .map(|p| serde_json::json!({ "path": p, "size": 10, "mode": 420 }))
        .collect();
    let report = serde_json::json!([{
        "id": "@plasius/sharedassets@1.0.0",
        "name": "@plasius/sharedassets",
        "version": "1.0.0",
        "files": files,
        "entryCount": paths.len(),
        "bundled": [],
    }]);
    CapturedOutput::new(format!(
        "npm notice\nnpm notice Tarball Contents\n{}\nnpm notice total files: {}\n",
        serde_json::to_string_pretty(&report).unwrap(),
        paths.len()
    ))
}

const COMMONJS: &str = r#"{"type":"commonjs"}"#;

#[test]
fn test_clean_package_passes() {
    let pkg = Package::new()
        .with_manifest(COMMONJS)
        .file("src/index.ts", "export const PlasiusLTDLogo = '/assets/logo.svg';\n")
        .file("tests/index.test.ts", "import { describe } from 'vitest';\n");

    let outcome = pkg.verify(&["dist-cjs/package.json", "src/index.ts"]);
    assert!(outcome.is_success(), "{outcome:?}");
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn test_private_path_fails_even_with_valid_manifest() {
    let pkg = Package::new().with_manifest(COMMONJS);

    let outcome = pkg.verify(&["dist-cjs/package.json", "plasius-ltd-site/x.ts"]);
    assert_eq!(outcome.exit_code(), 1);
    match outcome.error() {
        Some(VerifyError::PathLeak { paths }) => assert_eq!(paths, &["plasius-ltd-site/x.ts"]),
        other => panic!("expected path leak, got {other:?}"),
    }
}

#[test]
fn test_lunari_reference_fails_content_scan() {
    let pkg = Package::new()
        .with_manifest(COMMONJS)
        .file("src/index.ts", "export {};\n")
        .file("demo/app.tsx", "import x from 'y';\n\nconst theme = 'LuNaRi';\n");

    let outcome = pkg.verify(&["dist-cjs/package.json", "src/index.ts"]);
    match outcome.error() {
        Some(VerifyError::ContentLeak { violations }) => assert_eq!(
            violations,
            &[Violation::new(
                "demo/app.tsx",
                3,
                "proprietary Lunari artifact reference"
            )]
        ),
        other => panic!("expected content leak, got {other:?}"),
    }
}

#[test]
fn test_module_manifest_fails_regardless_of_other_checks() {
    for manifest in [r#"{"type":"module"}"#, r#"{"name":"dist"}"#] {
        let pkg = Package::new()
            .with_manifest(manifest)
            .file("src/index.ts", "export {};\n");

        let outcome = pkg.verify(&["dist-cjs/package.json", "src/index.ts"]);
        assert_eq!(
            outcome.error().map(VerifyError::category),
            Some(FailureCategory::Manifest),
            "manifest: {manifest}"
        );
    }
}

#[test]
fn test_missing_manifest_file() {
    let pkg = Package::new();
    let outcome = pkg.verify(&["dist-cjs/package.json"]);
    assert!(matches!(
        outcome.error(),
        Some(VerifyError::ManifestMissing { .. })
    ));
}

#[test]
fn test_missing_required_path_fails_without_leaks() {
    let pkg = Package::new()
        .with_manifest(COMMONJS)
        .file("src/index.ts", "export {};\n");

    let outcome = pkg.verify(&["src/index.ts", "dist/index.js"]);
    match outcome.error() {
        Some(VerifyError::RequiredPathMissing { path }) => {
            assert_eq!(path, "dist-cjs/package.json");
        }
        other => panic!("expected missing required path, got {other:?}"),
    }
}

#[test]
fn test_excluded_directories_never_fail_the_gate() {
    let pkg = Package::new()
        .with_manifest(COMMONJS)
        .file("src/node_modules/private/index.js", "plasius-ltd-site")
        .file("tests/dist/out.js", "pixelverse")
        .file("src/index.ts", "export {};\n");

    assert!(pkg.verify(&["dist-cjs/package.json"]).is_success());
}

#[test]
fn test_multiple_leaking_files_are_all_reported() {
    let pkg = Package::new()
        .with_manifest(COMMONJS)
        .file("src/a.ts", "// Plasius-Ltd\n")
        .file("src/b.ts", "ok\n")
        .file("tests/c.test.ts", "\n\n\npgp-signer\n");

    let outcome = pkg.verify(&["dist-cjs/package.json"]);
    let diagnostics = outcome.error().map(VerifyError::diagnostics).unwrap();
    assert_eq!(
        diagnostics,
        [
            "src/a.ts:1 (Plasius Ltd private reference)",
            "tests/c.test.ts:4 (proprietary PGP artifact reference)",
        ]
    );
}

#[test]
fn test_payload_without_files_fails_on_required_path() {
    let pkg = Package::new().with_manifest(COMMONJS);
    let config = VerifyConfig::for_project(pkg.root());
    let outcome = verify_package(
        &config,
        &CapturedOutput::new("[{\"id\":\"x\"}]"),
        &mut NoopProgress,
    );
    assert_eq!(
        outcome.error().map(VerifyError::category),
        Some(FailureCategory::RequiredPath)
    );
}

#[test]
fn test_written_manifest_satisfies_gate() {
    let pkg = Package::new()
        .file("dist-cjs/index.js", "module.exports = {};\n")
        .file("src/index.ts", "export {};\n");
    let config = VerifyConfig::for_project(pkg.root());

    write_manifest(&config).unwrap();

    assert!(pkg.verify(&["dist-cjs/index.js", "dist-cjs/package.json"]).is_success());
}

#[test]
fn test_extended_catalog_is_honored() {
    let pkg = Package::new()
        .with_manifest(COMMONJS)
        .file("src/index.ts", "const url = 'https://build.corp.internal';\n");
    let mut config = VerifyConfig::for_project(pkg.root());
    config
        .content_patterns
        .push(packguard_core::PatternSpec::literal("internal host", "corp.internal"));

    let outcome = verify_package(&config, &npm_output(&["dist-cjs/package.json"]), &mut NoopProgress);
    assert_eq!(
        outcome.error().map(VerifyError::diagnostics),
        Some(vec!["src/index.ts:1 (internal host)".to_string()])
    );
}
