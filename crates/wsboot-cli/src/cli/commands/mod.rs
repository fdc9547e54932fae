//! CLI command handlers. Each command is in its own file.

mod bootstrap;
mod clone;
mod completions;
mod plan;
mod status;

use std::sync::Arc;
use wsboot_core::error::BootstrapError;
use wsboot_core::fetch::GitFetcher;
use wsboot_core::install::PipInstaller;
use wsboot_core::pipeline::{Bootstrap, BootstrapSettings};
use wsboot_core::types::RepositoryResult;

pub use bootstrap::run_bootstrap;
pub use clone::run_clone;
pub use completions::run_completions;
pub use plan::run_plan;
pub use status::run_status;

fn make_bootstrap(settings: BootstrapSettings, python: &str) -> Bootstrap {
    Bootstrap::new(
        settings,
        Arc::new(GitFetcher::default()),
        Arc::new(PipInstaller::new(python)),
    )
}

fn print_results(results: &[RepositoryResult]) {
    println!("{:<30} {:<8} {}", "REPOSITORY", "OUTCOME", "REMOTE");
    for r in results {
        println!(
            "{:<30} {:<8} {}",
            r.name,
            r.outcome.as_str(),
            r.remote.as_deref().unwrap_or("-")
        );
    }
}

/// Print the captured logs of a failed run to stderr, verbatim.
fn report_failure(err: &BootstrapError) {
    match err {
        BootstrapError::Acquisition { results } => {
            print_results(results);
            for failed in err.failures() {
                eprintln!("--- {} ---", failed.name);
                eprintln!("{}", failed.error_log.as_deref().unwrap_or("(no output captured)"));
            }
        }
        BootstrapError::Install { repository, log } => {
            eprintln!("--- {} ---", repository);
            eprintln!("{}", log);
        }
        BootstrapError::Io(_) | BootstrapError::Join(_) => {}
    }
}
