//! Concurrent acquisition: one task per repository, wait for all of them.

use tokio::task::JoinSet;

use crate::error::BootstrapError;
use crate::resolver::RemoteFallbackResolver;
use crate::types::{Outcome, RepositoryRequest, RepositoryResult};

/// Spawns one resolution per request with no concurrency cap and waits for
/// every one before looking at failures. Each blocking resolution owns its
/// output buffer; results are put back into request order.
///
/// A resolution that panics counts as `Failed` for its repository.
pub async fn run_parallel(
    resolver: &RemoteFallbackResolver,
    requests: Vec<RepositoryRequest>,
) -> Result<Vec<RepositoryResult>, BootstrapError> {
    let names: Vec<String> = requests.iter().map(|r| r.name.clone()).collect();
    let mut slots: Vec<Option<RepositoryResult>> = vec![None; requests.len()];
    let mut join_set = JoinSet::new();

    for (idx, request) in requests.into_iter().enumerate() {
        let resolver = resolver.clone();
        join_set.spawn(async move {
            let res = tokio::task::spawn_blocking(move || resolver.resolve_request(&request)).await;
            (idx, res)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        let (idx, res) = joined?;
        let result = match res {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(repository = %names[idx], "resolution task failed: {}", e);
                RepositoryResult::failed(&names[idx], format!("resolution task failed: {e}"))
            }
        };
        tracing::debug!(repository = %result.name, outcome = result.outcome.as_str(), "task finished");
        slots[idx] = Some(result);
    }

    let results: Vec<RepositoryResult> = slots
        .into_iter()
        .zip(names)
        .map(|(slot, name)| {
            slot.unwrap_or_else(|| RepositoryResult::failed(name, "resolution task did not report"))
        })
        .collect();

    if results.iter().any(|r| r.outcome == Outcome::Failed) {
        return Err(BootstrapError::Acquisition { results });
    }
    Ok(results)
}
