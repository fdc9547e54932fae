//! Install execution: extras, then the editable install, task by task.

use std::io;
use std::path::Path;

use super::plan::InstallTask;
use crate::error::BootstrapError;

/// Exit status and combined output of one installer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutput {
    pub success: bool,
    pub output: String,
}

/// Install collaborator. The core only looks at `success`; output is
/// passed through to the user on failure.
pub trait Installer: Send + Sync {
    /// Install a list of package specifiers in one invocation.
    fn install_packages(&self, specs: &[String]) -> io::Result<InstallOutput>;
    /// Editable install of the repository at `path`.
    fn install_editable(&self, path: &Path) -> io::Result<InstallOutput>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Repositories installed.
    pub repositories: usize,
    /// Extra packages installed ahead of their repositories.
    pub extra_packages: usize,
}

/// Run every task in order. The first failure stops the run.
pub fn install_all(
    installer: &dyn Installer,
    tasks: &[InstallTask],
) -> Result<InstallSummary, BootstrapError> {
    let mut summary = InstallSummary::default();
    for task in tasks {
        let name = &task.repository_name;
        if !task.extra_deps.is_empty() {
            tracing::info!(repository = %name, packages = ?task.extra_deps, "installing extra dependencies");
            let out = installer.install_packages(&task.extra_deps);
            check(name, out)?;
            summary.extra_packages += task.extra_deps.len();
        }
        tracing::info!(repository = %name, path = %task.path.display(), "installing");
        check(name, installer.install_editable(&task.path))?;
        summary.repositories += 1;
    }
    Ok(summary)
}

fn check(repository: &str, out: io::Result<InstallOutput>) -> Result<(), BootstrapError> {
    let log = match out {
        Ok(out) if out.success => return Ok(()),
        Ok(out) => out.output,
        Err(e) => format!("could not run installer: {e}"),
    };
    tracing::error!(repository, "install failed");
    Err(BootstrapError::Install {
        repository: repository.to_string(),
        log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::ManifestKind;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records every call; fails the editable install of `fail_on`.
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
        fail_on: Option<PathBuf>,
    }

    impl Installer for Recording {
        fn install_packages(&self, specs: &[String]) -> io::Result<InstallOutput> {
            self.calls.lock().unwrap().push(format!("pkgs {}", specs.join(" ")));
            Ok(InstallOutput { success: true, output: String::new() })
        }

        fn install_editable(&self, path: &Path) -> io::Result<InstallOutput> {
            self.calls.lock().unwrap().push(format!("edit {}", path.display()));
            let success = self.fail_on.as_deref() != Some(path);
            Ok(InstallOutput {
                success,
                output: if success { String::new() } else { "build error".to_string() },
            })
        }
    }

    fn task(name: &str, extras: &[&str]) -> InstallTask {
        InstallTask {
            repository_name: name.to_string(),
            path: PathBuf::from("/ws").join(name),
            extra_deps: extras.iter().map(|s| s.to_string()).collect(),
            manifest_kind: ManifestKind::SetupPy,
        }
    }

    #[test]
    fn extras_precede_their_repository() {
        let installer = Recording::default();
        let summary =
            install_all(&installer, &[task("x", &[]), task("z", &["libfoo", "libbar"])]).unwrap();
        assert_eq!(
            *installer.calls.lock().unwrap(),
            ["edit /ws/x", "pkgs libfoo libbar", "edit /ws/z"]
        );
        assert_eq!(summary, InstallSummary { repositories: 2, extra_packages: 2 });
    }

    #[test]
    fn first_failure_stops_remaining_tasks() {
        let installer = Recording {
            fail_on: Some(PathBuf::from("/ws/b")),
            ..Recording::default()
        };
        let err = install_all(&installer, &[task("a", &[]), task("b", &[]), task("c", &[])])
            .unwrap_err();
        match err {
            BootstrapError::Install { repository, log } => {
                assert_eq!(repository, "b");
                assert_eq!(log, "build error");
            }
            other => panic!("expected install error, got {other:?}"),
        }
        assert_eq!(*installer.calls.lock().unwrap(), ["edit /ws/a", "edit /ws/b"]);
    }

    #[test]
    fn unrunnable_installer_is_install_failure() {
        struct Missing;
        impl Installer for Missing {
            fn install_packages(&self, _: &[String]) -> io::Result<InstallOutput> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no python"))
            }
            fn install_editable(&self, _: &Path) -> io::Result<InstallOutput> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no python"))
            }
        }
        let err = install_all(&Missing, &[task("a", &["dep"])]).unwrap_err();
        assert!(matches!(err, BootstrapError::Install { ref log, .. } if log.contains("no python")));
    }
}
