//! Sequential acquisition: strictly in order, short-circuit on failure.

use crate::error::BootstrapError;
use crate::resolver::RemoteFallbackResolver;
use crate::types::{Outcome, RepositoryRequest, RepositoryResult};

/// Resolves requests one at a time on the blocking pool. Stops at the first
/// `Failed` result; later requests are never attempted.
///
/// A resolution that panics counts as `Failed` for its repository.
pub async fn run_sequential(
    resolver: &RemoteFallbackResolver,
    requests: Vec<RepositoryRequest>,
) -> Result<Vec<RepositoryResult>, BootstrapError> {
    let mut results = Vec::with_capacity(requests.len());
    for request in requests {
        let name = request.name.clone();
        let resolver = resolver.clone();
        let result = match tokio::task::spawn_blocking(move || resolver.resolve_request(&request)).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(repository = %name, "resolution task failed: {}", e);
                RepositoryResult::failed(&name, format!("resolution task failed: {e}"))
            }
        };
        let failed = result.outcome == Outcome::Failed;
        results.push(result);
        if failed {
            return Err(BootstrapError::Acquisition { results });
        }
    }
    Ok(results)
}
