//! Pre-publish verification for npm packages.
//!
//! `packguard-core` checks the artifact an `npm publish` would ship before it
//! leaves the machine. It runs a packaging dry-run, reads the prospective file
//! list, and fails when the build metadata is wrong, when a private path would
//! be published, or when the source tree references proprietary names.
//!
//! # Examples
//!
//! ```no_run
//! use packguard_core::VerifyConfig;
//! use packguard_core::verify;
//!
//! let config = VerifyConfig::for_project(".");
//! let outcome = verify(&config);
//! if outcome.is_success() {
//!     println!("Public package check passed.");
//! }
//! std::process::exit(i32::from(outcome.exit_code()));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod metadata;
pub mod pack;
pub mod patterns;
pub mod report;
pub mod scan;
pub mod verify;

// Re-export main API types
pub use config::PackCommand;
pub use config::VerifyConfig;
pub use error::FailureCategory;
pub use error::Result;
pub use error::VerifyError;
pub use metadata::Manifest;
pub use metadata::write_manifest;
pub use pack::CapturedOutput;
pub use pack::CommandRunner;
pub use pack::FileList;
pub use pack::FileListEntry;
pub use pack::PackRunner;
pub use patterns::ForbiddenPattern;
pub use patterns::MatcherKind;
pub use patterns::PatternCatalog;
pub use patterns::PatternScope;
pub use patterns::PatternSpec;
pub use report::NoopProgress;
pub use report::Stage;
pub use report::VerificationOutcome;
pub use report::VerificationSummary;
pub use report::VerifyProgress;
pub use report::Violation;
pub use verify::verify;
pub use verify::verify_package;
