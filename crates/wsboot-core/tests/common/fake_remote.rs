//! Directory-backed remotes: a "clone" copies `<base>/<name>` into the
//! destination. Lets the pipeline run end to end without git or a network.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use wsboot_core::fetch::{FetchOptions, FetchOutput, Fetcher};
use wsboot_core::install::{InstallOutput, Installer};

pub const HANDSHAKE_RESET: &str =
    "kex_exchange_identification: read: Connection reset by peer\nfatal: Could not read from remote repository.";

#[derive(Default)]
pub struct DirFetcher {
    /// Remaining transient failures to inject per URL.
    flaky: Mutex<HashMap<String, u32>>,
    calls: Mutex<Vec<String>>,
}

impl DirFetcher {
    pub fn flaky(self, url: &str, failures: u32) -> Self {
        self.flaky.lock().unwrap().insert(url.to_string(), failures);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for DirFetcher {
    fn fetch(&self, url: &str, dest: &Path, _opts: FetchOptions) -> io::Result<FetchOutput> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(left) = self.flaky.lock().unwrap().get_mut(url) {
            if *left > 0 {
                *left -= 1;
                return Ok(FetchOutput::failed(HANDSHAKE_RESET));
            }
        }
        let src = PathBuf::from(url);
        if !src.is_dir() {
            return Ok(FetchOutput::failed(format!(
                "fatal: repository '{url}' does not exist"
            )));
        }
        copy_dir(&src, dest)?;
        Ok(FetchOutput::ok(format!("Cloning into '{}'...", dest.display())))
    }
}

fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

/// Create `<base>/<name>` with an optional manifest file.
pub fn publish(base: &Path, name: &str, manifest: Option<&str>) {
    let dir = base.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("README.md"), name).unwrap();
    if let Some(file) = manifest {
        fs::write(dir.join(file), "").unwrap();
    }
}

/// Installer that records `pkgs a,b` / `edit <name>` lines.
#[derive(Default)]
pub struct RecordingInstaller {
    calls: Mutex<Vec<String>>,
}

impl RecordingInstaller {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Installer for RecordingInstaller {
    fn install_packages(&self, specs: &[String]) -> io::Result<InstallOutput> {
        self.calls.lock().unwrap().push(format!("pkgs {}", specs.join(",")));
        Ok(InstallOutput {
            success: true,
            output: String::new(),
        })
    }

    fn install_editable(&self, path: &Path) -> io::Result<InstallOutput> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push(format!("edit {name}"));
        Ok(InstallOutput {
            success: true,
            output: String::new(),
        })
    }
}
