//! Acquire → plan → install, the single entry point used by the CLI.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use crate::fetch::{FetchOptions, Fetcher};
use crate::install::{install_all, InstallPlanner, InstallSummary, InstallTask, Installer};
use crate::remote::RemoteCatalog;
use crate::resolver::RemoteFallbackResolver;
use crate::retry::RetryPolicy;
use crate::scheduler::{self, Mode};
use crate::types::{ExtraDependencySpec, RepositoryRequest, RepositoryResult};
use crate::workspace::Workspace;

/// Fully resolved inputs for one run. Built once, before anything is fetched.
#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    pub workspace_dir: PathBuf,
    pub repositories: Vec<String>,
    pub remotes: RemoteCatalog,
    pub mode: Mode,
    pub fetch: FetchOptions,
    pub retry: RetryPolicy,
    pub extras: ExtraDependencySpec,
    /// Run the install phase after acquisition.
    pub install: bool,
}

impl BootstrapSettings {
    /// Settings straight from the config file, with `workspace_dir` as the
    /// fallback when the config does not name one.
    pub fn from_config(cfg: &BootstrapConfig, workspace_dir: PathBuf) -> Self {
        Self {
            workspace_dir: cfg.workspace_dir.clone().unwrap_or(workspace_dir),
            repositories: cfg.unique_repositories(),
            remotes: RemoteCatalog::new(cfg.remotes.iter().cloned()),
            mode: Mode::from_parallel_flag(cfg.parallel),
            fetch: FetchOptions {
                shallow: cfg.shallow,
            },
            retry: cfg
                .retry
                .as_ref()
                .map(RetryPolicy::from)
                .unwrap_or_default(),
            extras: cfg.extra_dependencies.clone(),
            install: true,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub results: Vec<RepositoryResult>,
    pub tasks: Vec<InstallTask>,
    /// `None` when the install phase was not run.
    pub installed: Option<InstallSummary>,
}

/// Read-only view of the workspace for the configured repositories. Never
/// fetches or installs.
#[derive(Debug, Clone)]
pub struct WorkspaceView {
    workspace: Workspace,
    repositories: Vec<String>,
    planner: InstallPlanner,
}

impl WorkspaceView {
    pub fn new(settings: &BootstrapSettings) -> Self {
        let workspace = Workspace::new(&settings.workspace_dir);
        Self {
            planner: InstallPlanner::new(workspace.clone(), settings.extras.clone()),
            repositories: settings.repositories.clone(),
            workspace,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn requests(&self) -> Vec<RepositoryRequest> {
        RepositoryRequest::from_names(self.repositories.iter().cloned(), &self.workspace)
    }

    /// Install plan for the repositories already in the workspace.
    /// Missing repositories are left out.
    pub fn plan_only(&self) -> Vec<InstallTask> {
        let present: Vec<RepositoryResult> = self
            .requests()
            .into_iter()
            .filter(|r| r.already_present)
            .map(|r| RepositoryResult::skipped(r.name))
            .collect();
        self.planner.plan(&present)
    }

    /// `(name, present)` for every configured repository, in order.
    pub fn status(&self) -> Vec<(String, bool)> {
        self.requests()
            .into_iter()
            .map(|r| (r.name, r.already_present))
            .collect()
    }
}

pub struct Bootstrap {
    view: WorkspaceView,
    mode: Mode,
    install: bool,
    resolver: RemoteFallbackResolver,
    installer: Arc<dyn Installer>,
}

impl Bootstrap {
    pub fn new(
        settings: BootstrapSettings,
        fetcher: Arc<dyn Fetcher>,
        installer: Arc<dyn Installer>,
    ) -> Self {
        let view = WorkspaceView::new(&settings);
        let resolver = RemoteFallbackResolver::new(
            view.workspace.clone(),
            fetcher,
            settings.remotes,
            settings.retry,
            settings.fetch,
        );
        Self {
            view,
            mode: settings.mode,
            install: settings.install,
            resolver,
            installer,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        self.view.workspace()
    }

    /// Acquire every repository. No install.
    pub async fn acquire(&self) -> Result<Vec<RepositoryResult>, BootstrapError> {
        self.view.workspace.ensure_base()?;
        scheduler::run(&self.resolver, self.view.requests(), self.mode).await
    }

    /// Acquire, plan and (unless disabled) install.
    pub async fn run(&self) -> Result<BootstrapReport, BootstrapError> {
        let results = self.acquire().await?;
        let tasks = self.view.planner.plan(&results);
        tracing::info!(tasks = tasks.len(), "install plan ready");

        let installed = if self.install {
            let installer = Arc::clone(&self.installer);
            let planned = tasks.clone();
            let summary =
                tokio::task::spawn_blocking(move || install_all(installer.as_ref(), &planned))
                    .await??;
            tracing::info!(
                repositories = summary.repositories,
                extra_packages = summary.extra_packages,
                "install complete"
            );
            Some(summary)
        } else {
            None
        };

        Ok(BootstrapReport {
            results,
            tasks,
            installed,
        })
    }

    /// Install plan for what is already in the workspace, without fetching.
    pub fn plan_only(&self) -> Vec<InstallTask> {
        self.view.plan_only()
    }

    pub fn status(&self) -> Vec<(String, bool)> {
        self.view.status()
    }
}
