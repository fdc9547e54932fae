//! `wsboot clone` – clone missing repositories only.

use anyhow::Result;
use wsboot_core::pipeline::BootstrapSettings;

use super::{make_bootstrap, print_results, report_failure};

pub async fn run_clone(settings: BootstrapSettings, python: &str) -> Result<()> {
    let boot = make_bootstrap(settings, python);
    match boot.acquire().await {
        Ok(results) => {
            print_results(&results);
            Ok(())
        }
        Err(err) => {
            report_failure(&err);
            Err(err.into())
        }
    }
}
