//! CLI for the wsboot workspace bootstrapper.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use wsboot_core::config::{self, BootstrapConfig};
use wsboot_core::fetch::FetchOptions;
use wsboot_core::pipeline::BootstrapSettings;
use wsboot_core::remote::RemoteCatalog;
use wsboot_core::scheduler::Mode;
use wsboot_core::types::ExtraDependencySpec;

use commands::{run_bootstrap, run_clone, run_completions, run_plan, run_status};

/// Top-level CLI for wsboot.
#[derive(Debug, Parser)]
#[command(name = "wsboot")]
#[command(about = "wsboot: clone a set of repositories with remote fallback and install them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Workspace and repository selection shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Repositories to work on (default: the configured list).
    pub repos: Vec<String>,

    /// Workspace directory (default: config value, else the current directory).
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
}

/// Fetch behaviour for commands that clone.
#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// Extra remote base, tried before the configured ones. Repeatable; order is kept.
    #[arg(long = "remote", value_name = "BASE")]
    pub remotes: Vec<String>,

    /// Clone all repositories concurrently.
    #[arg(long)]
    pub parallel: bool,

    /// Shallow clones (depth 1, all branches).
    #[arg(long)]
    pub shallow: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Clone missing repositories, then install them in order.
    Bootstrap {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        fetch: FetchArgs,
        /// Extra packages to install before a repository: NAME=SPEC[,SPEC...]. Repeatable.
        #[arg(long = "extra", value_name = "NAME=SPECS", value_parser = ExtraDependencySpec::parse_pair)]
        extras: Vec<(String, Vec<String>)>,
        /// Stop after cloning.
        #[arg(long)]
        no_install: bool,
    },

    /// Clone missing repositories without installing anything.
    Clone {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Show the install plan for repositories already in the workspace.
    Plan {
        #[command(flatten)]
        target: TargetArgs,
        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show which repositories are present in the workspace.
    Status {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Bootstrap {
                target,
                fetch,
                extras,
                no_install,
            } => {
                let mut settings = build_settings(&cfg, &target, &fetch, extras)?;
                settings.install = !no_install;
                run_bootstrap(settings, &cfg.python).await?
            }
            CliCommand::Clone { target, fetch } => {
                let mut settings = build_settings(&cfg, &target, &fetch, Vec::new())?;
                settings.install = false;
                run_clone(settings, &cfg.python).await?
            }
            CliCommand::Plan { target, json } => {
                let settings = build_settings(&cfg, &target, &FetchArgs::default(), Vec::new())?;
                run_plan(&settings, json)?
            }
            CliCommand::Status { target } => {
                let settings = build_settings(&cfg, &target, &FetchArgs::default(), Vec::new())?;
                run_status(&settings)?
            }
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

/// Merge config values with command-line overrides into run settings.
/// CLI remotes go in front of configured ones; CLI extras replace configured
/// entries for the same repository.
pub fn build_settings(
    cfg: &BootstrapConfig,
    target: &TargetArgs,
    fetch: &FetchArgs,
    extras: Vec<(String, Vec<String>)>,
) -> Result<BootstrapSettings> {
    let mut settings = BootstrapSettings::from_config(cfg, std::env::current_dir()?);

    if let Some(dir) = &target.workspace {
        settings.workspace_dir = dir.clone();
    }
    if !target.repos.is_empty() {
        settings.repositories = config::dedup_names(&target.repos);
    }
    if settings.repositories.is_empty() {
        anyhow::bail!(
            "no repositories given and none configured in {}",
            config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string())
        );
    }

    settings.remotes = RemoteCatalog::with_user_remotes(fetch.remotes.iter().cloned(), &cfg.remotes);
    if fetch.parallel {
        settings.mode = Mode::Parallel;
    }
    if fetch.shallow {
        settings.fetch = FetchOptions::shallow();
    }
    let cli_extras: ExtraDependencySpec = extras.into_iter().collect();
    settings.extras = settings.extras.merged_with(cli_extras);
    Ok(settings)
}

#[cfg(test)]
mod tests;
