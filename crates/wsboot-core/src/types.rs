//! Shared data model: repository requests, per-repository results and extra
//! install prerequisites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::workspace::Workspace;

/// One repository to acquire. Built once from the configured name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRequest {
    pub name: String,
    /// True when the repository directory already exists in the workspace.
    pub already_present: bool,
}

impl RepositoryRequest {
    /// Build a request, checking the workspace for an existing checkout.
    pub fn new(name: impl Into<String>, workspace: &Workspace) -> Self {
        let name = name.into();
        let already_present = workspace.is_present(&name);
        Self {
            name,
            already_present,
        }
    }

    /// Build one request per name, preserving order.
    pub fn from_names<I, S>(names: I, workspace: &Workspace) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|n| Self::new(n, workspace))
            .collect()
    }
}

/// Terminal state of a repository after acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Already present locally; nothing was fetched.
    Skipped,
    /// Fetched from one of the remotes.
    Cloned,
    /// Every remote failed.
    Failed,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Skipped => "skipped",
            Outcome::Cloned => "cloned",
            Outcome::Failed => "failed",
        }
    }

    /// Skipped and Cloned repositories are usable by the install planner.
    pub fn is_available(self) -> bool {
        matches!(self, Outcome::Skipped | Outcome::Cloned)
    }
}

/// Result of resolving one [`RepositoryRequest`]. Produced exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryResult {
    pub name: String,
    pub outcome: Outcome,
    /// Remote base that served the clone (only for `Cloned`).
    pub remote: Option<String>,
    /// Captured fetch output of the last failing remote (only for `Failed`).
    pub error_log: Option<String>,
}

impl RepositoryResult {
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Skipped,
            remote: None,
            error_log: None,
        }
    }

    pub fn cloned(name: impl Into<String>, remote: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Cloned,
            remote: Some(remote.into()),
            error_log: None,
        }
    }

    pub fn failed(name: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Failed,
            remote: None,
            error_log: Some(log.into()),
        }
    }
}

/// Extra packages to install before a repository's own editable install,
/// keyed by repository name. Immutable once handed to the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraDependencySpec(BTreeMap<String, Vec<String>>);

impl ExtraDependencySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra packages for `name`, or an empty slice.
    pub fn for_repository(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `other` over `self`; entries in `other` replace same-named ones.
    pub fn merged_with(mut self, other: ExtraDependencySpec) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Parse a `NAME=SPEC[,SPEC...]` pair as given on the command line.
    pub fn parse_pair(s: &str) -> Result<(String, Vec<String>), String> {
        let (name, specs) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=SPEC[,SPEC...], got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("missing repository name in '{s}'"));
        }
        let specs: Vec<String> = specs
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if specs.is_empty() {
            return Err(format!("no packages given for '{name}'"));
        }
        Ok((name.to_string(), specs))
    }
}

impl FromIterator<(String, Vec<String>)> for ExtraDependencySpec {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, specs) in iter {
            map.entry(name).or_default().extend(specs);
        }
        Self(map)
    }
}
