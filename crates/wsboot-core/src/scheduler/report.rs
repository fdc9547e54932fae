//! Per-run acquisition summary for logs and the CLI.

use crate::types::{Outcome, RepositoryResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub skipped: usize,
    pub cloned: usize,
    pub failed: usize,
}

impl AcquisitionReport {
    pub fn new(results: &[RepositoryResult]) -> Self {
        let mut report = Self::default();
        for r in results {
            match r.outcome {
                Outcome::Skipped => report.skipped += 1,
                Outcome::Cloned => report.cloned += 1,
                Outcome::Failed => report.failed += 1,
            }
        }
        report
    }

    pub fn total(&self) -> usize {
        self.skipped + self.cloned + self.failed
    }

    pub fn all_available(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn log(&self) {
        if self.all_available() {
            tracing::info!(cloned = self.cloned, skipped = self.skipped, "acquisition complete");
        } else {
            tracing::error!(
                cloned = self.cloned,
                skipped = self.skipped,
                failed = self.failed,
                "acquisition failed"
            );
        }
    }
}
