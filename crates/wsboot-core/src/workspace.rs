//! Local workspace: one base directory, one subdirectory per repository.
//!
//! Presence of `<base>/<name>` is the only "already acquired" signal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    base: PathBuf,
}

impl Workspace {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Directory the repository `name` is cloned into.
    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.repo_path(name).is_dir()
    }

    /// Create the base directory if it does not exist yet.
    pub fn ensure_base(&self) -> io::Result<()> {
        fs::create_dir_all(&self.base)
    }
}
