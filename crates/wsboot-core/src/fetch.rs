//! Fetch collaborator: the version-control clone the core drives but does
//! not interpret beyond exit status and captured output.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Options passed through to the fetch command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Shallow clone (`--depth 1 --no-single-branch`).
    pub shallow: bool,
}

impl FetchOptions {
    pub fn shallow() -> Self {
        Self { shallow: true }
    }
}

/// Exit status and combined stdout+stderr of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub success: bool,
    pub output: String,
}

impl FetchOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Runs one fetch of `url` into `dest`.
///
/// An `Err` means the command could not be run at all; a command that ran
/// and failed is `Ok` with `success == false`.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str, dest: &Path, opts: FetchOptions) -> io::Result<FetchOutput>;
}

/// Fetcher backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn clone_args(url: &str, dest: &Path, opts: FetchOptions) -> Vec<String> {
        let mut args = vec!["clone".to_string()];
        if opts.shallow {
            args.push("--depth".to_string());
            args.push("1".to_string());
            args.push("--no-single-branch".to_string());
        }
        args.push(url.to_string());
        args.push(dest.to_string_lossy().into_owned());
        args
    }
}

impl Fetcher for GitFetcher {
    fn fetch(&self, url: &str, dest: &Path, opts: FetchOptions) -> io::Result<FetchOutput> {
        let output = Command::new(&self.program)
            .args(Self::clone_args(url, dest, opts))
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(FetchOutput {
            success: output.status.success(),
            output: combined,
        })
    }
}
