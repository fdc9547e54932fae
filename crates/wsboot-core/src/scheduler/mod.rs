//! Acquisition coordinator.
//!
//! Runs the remote fallback resolver over every requested repository,
//! either one at a time (stop at the first failure) or as one task per
//! repository (wait for all, then fail). Results always come back in
//! request order.

mod parallel;
mod report;
mod sequential;

use crate::error::BootstrapError;
use crate::resolver::RemoteFallbackResolver;
use crate::types::{RepositoryRequest, RepositoryResult};

pub use parallel::run_parallel;
pub use report::AcquisitionReport;
pub use sequential::run_sequential;

/// How repositories are acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// One repository at a time; the first failure stops the run.
    #[default]
    Sequential,
    /// One task per repository, no cap; every task is awaited before failing.
    Parallel,
}

impl Mode {
    pub fn from_parallel_flag(parallel: bool) -> Self {
        if parallel {
            Mode::Parallel
        } else {
            Mode::Sequential
        }
    }
}

/// Resolve every request with `resolver` under `mode`.
///
/// Ok holds one result per request, in request order, none of them failed.
/// Any failure is reported as [`BootstrapError::Acquisition`] with all the
/// results gathered so far.
pub async fn run(
    resolver: &RemoteFallbackResolver,
    requests: Vec<RepositoryRequest>,
    mode: Mode,
) -> Result<Vec<RepositoryResult>, BootstrapError> {
    tracing::info!(count = requests.len(), ?mode, "acquiring repositories");
    let results = match mode {
        Mode::Sequential => run_sequential(resolver, requests).await,
        Mode::Parallel => run_parallel(resolver, requests).await,
    };
    match &results {
        Ok(r) => AcquisitionReport::new(r).log(),
        Err(BootstrapError::Acquisition { results }) => AcquisitionReport::new(results).log(),
        Err(_) => {}
    }
    results
}

#[cfg(test)]
mod tests;
