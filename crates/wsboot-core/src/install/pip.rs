//! Installer backed by `python -m pip`.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use super::run::{InstallOutput, Installer};

#[derive(Debug, Clone)]
pub struct PipInstaller {
    python: String,
}

impl PipInstaller {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn packages_args(specs: &[String]) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        args.extend(specs.iter().cloned());
        args
    }

    fn editable_args(path: &Path) -> Vec<String> {
        vec![
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
            "-e".to_string(),
            path.to_string_lossy().into_owned(),
        ]
    }

    fn run(&self, args: Vec<String>) -> io::Result<InstallOutput> {
        let output = Command::new(&self.python)
            .args(&args)
            .stdin(Stdio::null())
            .output()?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(InstallOutput {
            success: output.status.success(),
            output: combined,
        })
    }
}

impl Installer for PipInstaller {
    fn install_packages(&self, specs: &[String]) -> io::Result<InstallOutput> {
        self.run(Self::packages_args(specs))
    }

    fn install_editable(&self, path: &Path) -> io::Result<InstallOutput> {
        self.run(Self::editable_args(path))
    }
}
