use anyhow::{bail, Context, Result};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ExtraDependencySpec;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per remote URL (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds, before jitter.
    pub max_delay_secs: u64,
    /// Upper bound of the random jitter added to each delay, in seconds.
    #[serde(default = "default_jitter_secs")]
    pub jitter_secs: f64,
}

fn default_jitter_secs() -> f64 {
    4.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay_secs: 0.5,
            max_delay_secs: 30,
            jitter_secs: default_jitter_secs(),
        }
    }
}

impl RetryConfig {
    /// Reject delays that are negative, not finite, or too large for a
    /// `Duration`.
    pub fn validate(&self) -> Result<()> {
        for (field, secs) in [
            ("base_delay_secs", self.base_delay_secs),
            ("jitter_secs", self.jitter_secs),
        ] {
            if secs.is_sign_negative() {
                bail!("retry.{field} must not be negative (got {secs})");
            }
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("retry.{field} is out of range (got {secs})"))?;
        }
        Ok(())
    }
}

/// Global configuration loaded from `~/.config/wsboot/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Repositories to acquire, in install order.
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Default remote bases, highest priority first. CLI remotes go in front.
    #[serde(default)]
    pub remotes: Vec<String>,
    /// Clone all repositories concurrently.
    #[serde(default)]
    pub parallel: bool,
    /// Shallow clones (`--depth 1 --no-single-branch`).
    #[serde(default)]
    pub shallow: bool,
    /// Workspace directory; the current directory when unset.
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,
    /// Interpreter used to run `pip`.
    #[serde(default = "default_python")]
    pub python: String,
    /// Packages to install before a repository's own install.
    #[serde(default)]
    pub extra_dependencies: ExtraDependencySpec,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_python() -> String {
    "python3".to_string()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            remotes: Vec::new(),
            parallel: false,
            shallow: false,
            workspace_dir: None,
            python: default_python(),
            extra_dependencies: ExtraDependencySpec::default(),
            retry: None,
        }
    }
}

impl BootstrapConfig {
    /// Repository names with duplicates removed (first occurrence kept).
    /// Concurrent clones rely on names being unique.
    pub fn unique_repositories(&self) -> Vec<String> {
        dedup_names(&self.repositories)
    }
}

/// Drop repeated names, keeping the first occurrence and the original order.
pub fn dedup_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if out.iter().any(|n| n == name) {
            tracing::warn!(repository = name, "duplicate repository name ignored");
            continue;
        }
        out.push(name.to_string());
    }
    out
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wsboot")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BootstrapConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<BootstrapConfig> {
    if !path.exists() {
        let default_cfg = BootstrapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: BootstrapConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    if let Some(retry) = &cfg.retry {
        retry
            .validate()
            .with_context(|| format!("invalid config: {}", path.display()))?;
    }
    Ok(cfg)
}
