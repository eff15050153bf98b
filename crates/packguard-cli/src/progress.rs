//! Spinner shown while a verification run is in progress.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use packguard_core::Stage;
use packguard_core::VerifyProgress;
use std::path::Path;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// CLI spinner implementing `VerifyProgress`.
///
/// Shows the current stage and the number of source files scanned so far.
/// Clears itself on drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({pos} files)")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    ///
    /// The spinner draws on stderr, so that is the stream checked.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }

    #[cfg(test)]
    fn files_scanned(&self) -> u64 {
        self.bar.position()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl VerifyProgress for CliProgress {
    fn on_stage(&mut self, stage: Stage) {
        self.bar.set_message(stage.description());
    }

    fn on_file_scanned(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
