//! Install planning and execution.
//!
//! The planner turns acquired repositories into ordered install tasks; the
//! runner hands them to an [`Installer`], extras first.

mod manifest;
mod pip;
mod plan;
mod run;

pub use manifest::{probe_manifest, ManifestKind};
pub use pip::PipInstaller;
pub use plan::{InstallPlanner, InstallTask};
pub use run::{install_all, InstallOutput, InstallSummary, Installer};
