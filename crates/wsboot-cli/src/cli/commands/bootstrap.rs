//! `wsboot bootstrap` – clone missing repositories, then install them.

use anyhow::Result;
use wsboot_core::pipeline::BootstrapSettings;

use super::{make_bootstrap, print_results, report_failure};

pub async fn run_bootstrap(settings: BootstrapSettings, python: &str) -> Result<()> {
    let boot = make_bootstrap(settings, python);
    tracing::info!(workspace = %boot.workspace().base().display(), "bootstrap starting");
    match boot.run().await {
        Ok(report) => {
            print_results(&report.results);
            match report.installed {
                Some(summary) => println!(
                    "Installed {} repositories ({} extra packages).",
                    summary.repositories, summary.extra_packages
                ),
                None => println!("Install skipped; {} repositories would be installed.", report.tasks.len()),
            }
            Ok(())
        }
        Err(err) => {
            report_failure(&err);
            Err(err.into())
        }
    }
}
