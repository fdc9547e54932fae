//! Run-level errors surfaced to the CLI.

use std::io;
use thiserror::Error;

use crate::types::{Outcome, RepositoryResult};

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// At least one repository could not be fetched from any remote.
    /// Carries every result produced before the run stopped.
    #[error("failed to acquire {}", failed_names(.results))]
    Acquisition { results: Vec<RepositoryResult> },

    /// The installer reported failure; remaining installs were not run.
    #[error("install failed for {repository}")]
    Install { repository: String, log: String },

    #[error("workspace I/O: {0}")]
    Io(#[from] io::Error),

    #[error("worker task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl BootstrapError {
    /// Failed results of an acquisition error, empty for other kinds.
    pub fn failures(&self) -> Vec<&RepositoryResult> {
        match self {
            BootstrapError::Acquisition { results } => results
                .iter()
                .filter(|r| r.outcome == Outcome::Failed)
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn failed_names(results: &[RepositoryResult]) -> String {
    results
        .iter()
        .filter(|r| r.outcome == Outcome::Failed)
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisition_error_names_failed_repositories() {
        let err = BootstrapError::Acquisition {
            results: vec![
                RepositoryResult::skipped("a"),
                RepositoryResult::failed("b", "boom"),
                RepositoryResult::cloned("c", "https://h/org"),
                RepositoryResult::failed("d", "bang"),
            ],
        };
        assert_eq!(err.to_string(), "failed to acquire b, d");
        let failed: Vec<&str> = err.failures().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(failed, ["b", "d"]);
    }

    #[test]
    fn install_error_display() {
        let err = BootstrapError::Install {
            repository: "envs".to_string(),
            log: "pip exploded".to_string(),
        };
        assert_eq!(err.to_string(), "install failed for envs");
        assert!(err.failures().is_empty());
    }
}
