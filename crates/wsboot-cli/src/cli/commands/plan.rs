//! `wsboot plan` – show what would be installed, in order.

use anyhow::Result;
use wsboot_core::pipeline::{BootstrapSettings, WorkspaceView};

pub fn run_plan(settings: &BootstrapSettings, json: bool) -> Result<()> {
    let tasks = WorkspaceView::new(settings).plan_only();
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("Nothing to install.");
        return Ok(());
    }
    for (i, task) in tasks.iter().enumerate() {
        let manifest = task.manifest_kind.file_name().unwrap_or("-");
        if task.extra_deps.is_empty() {
            println!("{:>3}. {} ({})", i + 1, task.repository_name, manifest);
        } else {
            println!(
                "{:>3}. {} ({}) after: {}",
                i + 1,
                task.repository_name,
                manifest,
                task.extra_deps.join(" ")
            );
        }
    }
    Ok(())
}
