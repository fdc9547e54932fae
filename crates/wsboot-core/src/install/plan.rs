//! Ordered install list from acquisition results.

use serde::Serialize;
use std::path::PathBuf;

use super::manifest::{probe_manifest, ManifestKind};
use crate::types::{ExtraDependencySpec, RepositoryResult};
use crate::workspace::Workspace;

/// One repository to install, preceded by its extra packages (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallTask {
    pub repository_name: String,
    pub path: PathBuf,
    pub extra_deps: Vec<String>,
    pub manifest_kind: ManifestKind,
}

#[derive(Debug, Clone)]
pub struct InstallPlanner {
    workspace: Workspace,
    extras: ExtraDependencySpec,
}

impl InstallPlanner {
    pub fn new(workspace: Workspace, extras: ExtraDependencySpec) -> Self {
        Self { workspace, extras }
    }

    /// Available repositories with a manifest, in input order.
    /// Failed results and repositories without a manifest are left out.
    pub fn plan(&self, results: &[RepositoryResult]) -> Vec<InstallTask> {
        results
            .iter()
            .filter(|r| r.outcome.is_available())
            .filter_map(|r| self.task_for(&r.name))
            .collect()
    }

    fn task_for(&self, name: &str) -> Option<InstallTask> {
        let path = self.workspace.repo_path(name);
        let manifest_kind = probe_manifest(&path);
        if !manifest_kind.is_installable() {
            tracing::debug!(repository = name, "no manifest, not installing");
            return None;
        }
        Some(InstallTask {
            repository_name: name.to_string(),
            path,
            extra_deps: self.extras.for_repository(name).to_vec(),
            manifest_kind,
        })
    }
}
