//! Verification pipeline.
//!
//! Stages run in a fixed order and the first failure ends the run:
//!
//! 1. packaging dry-run
//! 2. file-list extraction
//! 3. build-output manifest check
//! 4. required-path check
//! 5. forbidden path scan
//! 6. forbidden content scan
//!
//! Nothing here terminates the process; the caller maps the returned
//! [`VerificationOutcome`] onto an exit status.

use crate::config::VerifyConfig;
use crate::error::Result;
use crate::error::VerifyError;
use crate::metadata::ensure_required_path;
use crate::metadata::verify_manifest;
use crate::pack::CommandRunner;
use crate::pack::PackRunner;
use crate::pack::parse_pack_output;
use crate::patterns::PatternCatalog;
use crate::patterns::PatternScope;
use crate::report::NoopProgress;
use crate::report::Stage;
use crate::report::VerificationOutcome;
use crate::report::VerificationSummary;
use crate::report::VerifyProgress;
use crate::scan::scan_paths;
use crate::scan::scan_sources;
use tracing::debug;
use tracing::info;

/// Runs the full pipeline with the configured packaging command.
///
/// # Examples
///
/// ```no_run
/// use packguard_core::VerifyConfig;
/// use packguard_core::verify;
///
/// let outcome = verify(&VerifyConfig::for_project("./my-package"));
/// assert!(outcome.is_success());
/// ```
pub fn verify(config: &VerifyConfig) -> VerificationOutcome {
    let runner = CommandRunner::new(config.pack.clone());
    verify_package(config, &runner, &mut NoopProgress)
}

/// Runs the full pipeline, taking dry-run output from `runner`.
///
/// # Examples
///
/// ```
/// use packguard_core::CapturedOutput;
/// use packguard_core::FailureCategory;
/// use packguard_core::NoopProgress;
/// use packguard_core::VerifyConfig;
/// use packguard_core::verify_package;
///
/// let config = VerifyConfig::for_project("/nonexistent/pkg");
/// let runner = CapturedOutput::new("npm ERR! no payload");
/// let outcome = verify_package(&config, &runner, &mut NoopProgress);
/// assert_eq!(outcome.error().map(|e| e.category()), Some(FailureCategory::MalformedOutput));
/// ```
pub fn verify_package(
    config: &VerifyConfig,
    runner: &dyn PackRunner,
    progress: &mut dyn VerifyProgress,
) -> VerificationOutcome {
    let result = run_stages(config, runner, progress);
    progress.on_complete();

    match &result {
        Ok(summary) => info!(
            tarball_entries = summary.tarball_entries,
            files_scanned = summary.files_scanned,
            "public package check passed"
        ),
        Err(err) => info!(category = %err.category(), "public package check failed: {err}"),
    }

    VerificationOutcome::from(result)
}

fn run_stages(
    config: &VerifyConfig,
    runner: &dyn PackRunner,
    progress: &mut dyn VerifyProgress,
) -> Result<VerificationSummary> {
    let path_catalog = PatternCatalog::compile(PatternScope::Path, &config.path_patterns)?;
    let content_catalog = PatternCatalog::compile(PatternScope::Content, &config.content_patterns)?;

    enter(progress, Stage::Pack);
    let raw = runner.dry_run()?;

    enter(progress, Stage::Parse);
    let files = parse_pack_output(&raw)?;

    enter(progress, Stage::Manifest);
    verify_manifest(config)?;

    enter(progress, Stage::RequiredPath);
    for required in &config.required_paths {
        ensure_required_path(&files, required)?;
    }

    enter(progress, Stage::PathScan);
    let leaked = scan_paths(files.paths(), &path_catalog);
    if !leaked.is_empty() {
        return Err(VerifyError::PathLeak { paths: leaked });
    }

    enter(progress, Stage::ContentScan);
    let scan = scan_sources(config, &content_catalog, progress)?;
    if !scan.is_clean() {
        return Err(VerifyError::ContentLeak {
            violations: scan.violations,
        });
    }

    Ok(VerificationSummary {
        tarball_entries: files.len(),
        files_scanned: scan.files_scanned,
    })
}

fn enter(progress: &mut dyn VerifyProgress, stage: Stage) {
    debug!(?stage, "entering stage");
    progress.on_stage(stage);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pack::CapturedOutput;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        stages: Vec<Stage>,
        completed: bool,
    }

    impl VerifyProgress for Recorder {
        fn on_stage(&mut self, stage: Stage) {
            self.stages.push(stage);
        }

        fn on_file_scanned(&mut self, _path: &Path) {}

        fn on_complete(&mut self) {
            self.completed = true;
        }
    }

    fn pack_output(paths: &[&str]) -> CapturedOutput {
        let files: Vec<_> = paths
            .iter()
            .map(|p| serde_json::json!({ "path": p }))
            .collect();
        CapturedOutput::new(serde_json::json!([{ "files": files }]).to_string())
    }

    fn project(manifest: &str) -> (TempDir, VerifyConfig) {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dist-cjs")).unwrap();
        fs::write(temp.path().join("dist-cjs/package.json"), manifest).unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/index.ts"), "export {};\n").unwrap();
        let config = VerifyConfig::for_project(temp.path());
        (temp, config)
    }

    #[test]
    fn test_all_stages_run_in_order_on_success() {
        let (_temp, config) = project(r#"{"type":"commonjs"}"#);
        let mut recorder = Recorder::default();
        let outcome = verify_package(
            &config,
            &pack_output(&["dist-cjs/package.json", "src/index.ts"]),
            &mut recorder,
        );

        assert!(outcome.is_success(), "{outcome:?}");
        assert_eq!(
            recorder.stages,
            [
                Stage::Pack,
                Stage::Parse,
                Stage::Manifest,
                Stage::RequiredPath,
                Stage::PathScan,
                Stage::ContentScan,
            ]
        );
        assert!(recorder.completed);
        match outcome {
            VerificationOutcome::Success(summary) => {
                assert_eq!(summary.tarball_entries, 2);
                assert_eq!(summary.files_scanned, 1);
            }
            VerificationOutcome::Failure(err) => panic!("unexpected failure: {err}"),
        }
    }

    #[test]
    fn test_manifest_failure_stops_before_later_stages() {
        let (_temp, config) = project(r#"{"type":"module"}"#);
        let mut recorder = Recorder::default();
        let outcome = verify_package(
            &config,
            &pack_output(&["dist-cjs/package.json", "frontend/app.js"]),
            &mut recorder,
        );

        assert!(matches!(
            outcome.error(),
            Some(VerifyError::ManifestFieldMismatch { .. })
        ));
        assert_eq!(recorder.stages.last(), Some(&Stage::Manifest));
        assert!(recorder.completed);
    }

    #[test]
    fn test_path_leak_stops_before_content_scan() {
        let (temp, config) = project(r#"{"type":"commonjs"}"#);
        fs::write(temp.path().join("src/leak.ts"), "lunari").unwrap();
        let mut recorder = Recorder::default();
        let outcome = verify_package(
            &config,
            &pack_output(&["dist-cjs/package.json", "dashboard/index.html"]),
            &mut recorder,
        );

        match outcome.error() {
            Some(VerifyError::PathLeak { paths }) => assert_eq!(paths, &["dashboard/index.html"]),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!recorder.stages.contains(&Stage::ContentScan));
    }

    #[test]
    fn test_invalid_catalog_fails_before_invocation() {
        let (_temp, mut config) = project(r#"{"type":"commonjs"}"#);
        config.content_patterns.push(crate::patterns::PatternSpec::owned(
            "broken",
            crate::patterns::MatcherKind::Regex,
            "(",
        ));
        let mut recorder = Recorder::default();
        let outcome = verify_package(&config, &pack_output(&[]), &mut recorder);

        assert!(matches!(
            outcome.error(),
            Some(VerifyError::InvalidPattern { .. })
        ));
        assert!(recorder.stages.is_empty());
    }
}
