//! Packaging manifest detection.

use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestKind {
    /// Legacy `setup.py` build script.
    SetupPy,
    /// `pyproject.toml` project metadata.
    PyProjectToml,
    None,
}

impl ManifestKind {
    /// Manifests in probe priority order with their file names.
    const PROBE_ORDER: [(&'static str, ManifestKind); 2] = [
        ("setup.py", ManifestKind::SetupPy),
        ("pyproject.toml", ManifestKind::PyProjectToml),
    ];

    pub fn file_name(self) -> Option<&'static str> {
        match self {
            ManifestKind::SetupPy => Some("setup.py"),
            ManifestKind::PyProjectToml => Some("pyproject.toml"),
            ManifestKind::None => None,
        }
    }

    pub fn is_installable(self) -> bool {
        self != ManifestKind::None
    }
}

/// Look for a manifest in `repo_dir`; `setup.py` wins over `pyproject.toml`.
pub fn probe_manifest(repo_dir: &Path) -> ManifestKind {
    ManifestKind::PROBE_ORDER
        .iter()
        .find(|(file, _)| repo_dir.join(file).is_file())
        .map(|(_, kind)| *kind)
        .unwrap_or(ManifestKind::None)
}
