//! Terminal failure of one remote URL.

use thiserror::Error;

/// Why a URL was given up on. Either variant sends the resolver on to the
/// next remote; neither is fatal for the repository by itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// Non-transient failure (repository missing, auth refused, ...).
    #[error("fetch failed")]
    Fatal { log: String },
    /// Transient failures kept recurring until the attempt cap was hit.
    #[error("gave up after {attempts} attempts on transient errors")]
    RetryExhausted { attempts: u32, log: String },
}

impl AttemptError {
    /// Captured output of the last attempt.
    pub fn log(&self) -> &str {
        match self {
            AttemptError::Fatal { log } | AttemptError::RetryExhausted { log, .. } => log,
        }
    }

    pub fn into_log(self) -> String {
        match self {
            AttemptError::Fatal { log } | AttemptError::RetryExhausted { log, .. } => log,
        }
    }
}
