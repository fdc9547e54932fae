//! `wsboot status` – which repositories are already in the workspace.

use anyhow::Result;
use wsboot_core::pipeline::{BootstrapSettings, WorkspaceView};

pub fn run_status(settings: &BootstrapSettings) -> Result<()> {
    let view = WorkspaceView::new(settings);
    println!("workspace: {}", view.workspace().base().display());
    println!("{:<30} {}", "REPOSITORY", "STATE");
    for (name, present) in view.status() {
        println!("{:<30} {}", name, if present { "present" } else { "missing" });
    }
    Ok(())
}
