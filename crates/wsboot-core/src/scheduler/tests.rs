use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;
use crate::fetch::{FetchOptions, FetchOutput, Fetcher};
use crate::remote::RemoteCatalog;
use crate::resolver::testing::UrlScript;
use crate::retry::RetryPolicy;
use crate::types::Outcome;
use crate::workspace::Workspace;

const REMOTES: &[&str] = &["https://primary/org", "https://mirror/org"];

fn resolver_with(ws: &Workspace, fetcher: Arc<dyn Fetcher>) -> RemoteFallbackResolver {
    RemoteFallbackResolver::new(
        ws.clone(),
        fetcher,
        RemoteCatalog::new(REMOTES.iter().copied()),
        RetryPolicy::immediate(3),
        FetchOptions::default(),
    )
}

fn b_fails_everywhere() -> UrlScript {
    UrlScript::default()
        .failing("https://primary/org/b", &["primary: not found"])
        .failing("https://mirror/org/b", &["mirror: not found"])
}

/// Succeeds after a per-URL delay and records the order fetches finished in.
struct Delayed {
    delays: Vec<(&'static str, Duration)>,
    finished: Mutex<Vec<String>>,
}

impl Fetcher for Delayed {
    fn fetch(&self, url: &str, dest: &Path, _opts: FetchOptions) -> io::Result<FetchOutput> {
        let delay = self
            .delays
            .iter()
            .find(|(u, _)| *u == url)
            .map(|(_, d)| *d)
            .unwrap_or_default();
        std::thread::sleep(delay);
        std::fs::create_dir_all(dest)?;
        self.finished.lock().unwrap().push(url.to_string());
        Ok(FetchOutput::ok(""))
    }
}

struct Panicking;

impl Fetcher for Panicking {
    fn fetch(&self, url: &str, dest: &Path, _opts: FetchOptions) -> io::Result<FetchOutput> {
        if url.ends_with("/boom") {
            panic!("fetcher blew up");
        }
        std::fs::create_dir_all(dest)?;
        Ok(FetchOutput::ok(""))
    }
}

fn names(results: &[RepositoryResult]) -> Vec<&str> {
    results.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn sequential_clones_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let fetcher = Arc::new(UrlScript::default());
    let resolver = resolver_with(&ws, fetcher.clone());
    let requests = RepositoryRequest::from_names(["a", "b", "c"], &ws);

    let results = run(&resolver, requests, Mode::Sequential).await.unwrap();
    assert_eq!(names(&results), ["a", "b", "c"]);
    assert!(results.iter().all(|r| r.outcome == Outcome::Cloned));
    assert_eq!(
        fetcher.calls(),
        ["https://primary/org/a", "https://primary/org/b", "https://primary/org/c"]
    );
}

#[tokio::test]
async fn sequential_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let fetcher = Arc::new(b_fails_everywhere());
    let resolver = resolver_with(&ws, fetcher.clone());
    let requests = RepositoryRequest::from_names(["a", "b", "c"], &ws);

    let err = run(&resolver, requests, Mode::Sequential).await.unwrap_err();
    let BootstrapError::Acquisition { results } = err else {
        panic!("expected acquisition error");
    };
    assert_eq!(names(&results), ["a", "b"]);
    assert_eq!(results[1].error_log.as_deref(), Some("mirror: not found"));
    assert!(!fetcher.calls().iter().any(|u| u.ends_with("/c")), "c never attempted");
    assert!(!ws.is_present("c"));
}

#[tokio::test]
async fn parallel_waits_for_all_and_keeps_request_order() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let fetcher = Arc::new(b_fails_everywhere());
    let resolver = resolver_with(&ws, fetcher.clone());
    let requests = RepositoryRequest::from_names(["a", "b", "c"], &ws);

    let err = run(&resolver, requests, Mode::Parallel).await.unwrap_err();
    let BootstrapError::Acquisition { results } = err else {
        panic!("expected acquisition error");
    };
    assert_eq!(names(&results), ["a", "b", "c"]);
    assert_eq!(results[0].outcome, Outcome::Cloned);
    assert_eq!(results[1].outcome, Outcome::Failed);
    assert_eq!(results[1].error_log.as_deref(), Some("mirror: not found"));
    assert_eq!(results[2].outcome, Outcome::Cloned);
    assert!(ws.is_present("a"));
    assert!(ws.is_present("c"));
}

#[tokio::test]
async fn parallel_restores_order_regardless_of_completion() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let fetcher = Arc::new(Delayed {
        delays: vec![
            ("https://primary/org/a", Duration::from_millis(300)),
            ("https://primary/org/b", Duration::from_millis(150)),
        ],
        finished: Mutex::new(Vec::new()),
    });
    let resolver = resolver_with(&ws, fetcher.clone());
    let requests = RepositoryRequest::from_names(["a", "b", "c"], &ws);

    let results = run(&resolver, requests, Mode::Parallel).await.unwrap();
    assert_eq!(names(&results), ["a", "b", "c"]);
    let finished = fetcher.finished.lock().unwrap().clone();
    assert_eq!(finished.len(), 3);
    assert_eq!(finished.last().map(String::as_str), Some("https://primary/org/a"));
}

#[tokio::test]
async fn parallel_panic_is_reported_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let resolver = resolver_with(&ws, Arc::new(Panicking));
    let requests = RepositoryRequest::from_names(["ok", "boom"], &ws);

    let err = run(&resolver, requests, Mode::Parallel).await.unwrap_err();
    let failures = err.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "boom");
    assert!(failures[0]
        .error_log
        .as_deref()
        .unwrap_or_default()
        .contains("resolution task failed"));
}

#[tokio::test]
async fn sequential_panic_keeps_earlier_results() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let resolver = resolver_with(&ws, Arc::new(Panicking));
    let requests = RepositoryRequest::from_names(["ok", "boom", "later"], &ws);

    let err = run(&resolver, requests, Mode::Sequential).await.unwrap_err();
    let BootstrapError::Acquisition { results } = err else {
        panic!("expected acquisition error");
    };
    assert_eq!(names(&results), ["ok", "boom"]);
    assert_eq!(results[0].outcome, Outcome::Cloned);
    assert_eq!(results[1].outcome, Outcome::Failed);
    assert!(results[1]
        .error_log
        .as_deref()
        .unwrap_or_default()
        .contains("resolution task failed"));
    assert!(!ws.is_present("later"));
}

#[tokio::test]
async fn rerun_over_populated_workspace_only_skips() {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(dir.path());
    let fetcher = Arc::new(UrlScript::default());
    let resolver = resolver_with(&ws, fetcher.clone());

    for mode in [Mode::Parallel, Mode::Sequential] {
        let requests = RepositoryRequest::from_names(["a", "b"], &ws);
        run(&resolver, requests, mode).await.unwrap();
    }
    assert_eq!(fetcher.calls().len(), 2, "second run must not fetch");

    let requests = RepositoryRequest::from_names(["a", "b"], &ws);
    let again = run(&resolver, requests, Mode::Parallel).await.unwrap();
    assert!(again.iter().all(|r| r.outcome == Outcome::Skipped));
    assert_eq!(fetcher.calls().len(), 2);
}

#[test]
fn mode_from_flag() {
    assert_eq!(Mode::from_parallel_flag(true), Mode::Parallel);
    assert_eq!(Mode::from_parallel_flag(false), Mode::Sequential);
    assert_eq!(Mode::default(), Mode::Sequential);
}
