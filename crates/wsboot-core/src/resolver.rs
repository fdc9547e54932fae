//! Remote fallback resolution: try each remote base in catalog order until
//! one clone succeeds.

use std::sync::Arc;

use crate::fetch::{FetchOptions, Fetcher};
use crate::remote::{repo_url, RemoteCatalog};
use crate::retry::{self, AttemptError, RetryPolicy};
use crate::types::{RepositoryRequest, RepositoryResult};
use crate::workspace::Workspace;

/// Resolves one repository at a time. Cheap to clone; every clone shares
/// the same fetcher, so one instance can be handed to many tasks.
#[derive(Clone)]
pub struct RemoteFallbackResolver {
    workspace: Workspace,
    fetcher: Arc<dyn Fetcher>,
    remotes: Arc<RemoteCatalog>,
    policy: RetryPolicy,
    opts: FetchOptions,
}

impl std::fmt::Debug for RemoteFallbackResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFallbackResolver")
            .field("workspace", &self.workspace)
            .field("remotes", &self.remotes)
            .field("policy", &self.policy)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl RemoteFallbackResolver {
    pub fn new(
        workspace: Workspace,
        fetcher: Arc<dyn Fetcher>,
        remotes: RemoteCatalog,
        policy: RetryPolicy,
        opts: FetchOptions,
    ) -> Self {
        Self {
            workspace,
            fetcher,
            remotes: Arc::new(remotes),
            policy,
            opts,
        }
    }

    /// Resolve a request. Requests marked present are skipped without a
    /// look at the remotes.
    pub fn resolve_request(&self, request: &RepositoryRequest) -> RepositoryResult {
        if request.already_present {
            tracing::info!(repository = %request.name, "already present, skipping");
            return RepositoryResult::skipped(&request.name);
        }
        self.resolve(&request.name)
    }

    /// Resolve `name`: `Skipped` if its directory exists, `Cloned` from the
    /// first remote that works, otherwise `Failed` with the last remote's log.
    pub fn resolve(&self, name: &str) -> RepositoryResult {
        if self.workspace.is_present(name) {
            tracing::info!(repository = name, "already present, skipping");
            return RepositoryResult::skipped(name);
        }
        if self.remotes.is_empty() {
            tracing::error!(repository = name, "no remotes configured");
            return RepositoryResult::failed(name, "no remotes configured");
        }

        let dest = self.workspace.repo_path(name);
        let mut last_log = String::new();
        for base in self.remotes.iter() {
            let url = repo_url(base, name);
            match retry::attempt(self.fetcher.as_ref(), &self.policy, &url, &dest, self.opts) {
                Ok(attempts) => {
                    tracing::info!(repository = name, remote = base, attempts, "cloned");
                    return RepositoryResult::cloned(name, base);
                }
                Err(e) => {
                    match &e {
                        AttemptError::RetryExhausted { attempts, .. } => {
                            tracing::warn!(repository = name, url = %url, attempts, "transient failures exhausted retries, trying next remote");
                        }
                        AttemptError::Fatal { .. } => {
                            tracing::debug!(repository = name, url = %url, "remote unavailable, trying next remote");
                        }
                    }
                    last_log = e.into_log();
                }
            }
        }

        tracing::error!(repository = name, remotes = self.remotes.len(), "all remotes failed");
        RepositoryResult::failed(name, last_log)
    }
}
