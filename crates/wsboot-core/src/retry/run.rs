//! Retry loop: fetch one URL until success, a fatal failure, or the cap.

use std::fs;
use std::io;
use std::path::Path;

use super::classify::classify_output;
use super::error::AttemptError;
use super::policy::{ErrorKind, RetryDecision, RetryPolicy};
use crate::fetch::{FetchOptions, Fetcher};

/// Fetches `url` into `dest`, retrying the same URL on transient failures.
/// Returns the number of attempts made on success.
///
/// Each attempt starts from an empty `dest`; whatever a failed attempt left
/// behind is removed first. Blocks the calling thread while backing off.
pub fn attempt(
    fetcher: &dyn Fetcher,
    policy: &RetryPolicy,
    url: &str,
    dest: &Path,
    opts: FetchOptions,
) -> Result<u32, AttemptError> {
    let mut attempt = 1u32;
    loop {
        if let Err(e) = remove_partial(dest) {
            return Err(AttemptError::Fatal {
                log: format!("could not clear {}: {}", dest.display(), e),
            });
        }

        tracing::debug!(url, attempt, "fetch attempt");
        let out = match fetcher.fetch(url, dest, opts) {
            Ok(out) => out,
            Err(e) => {
                return Err(AttemptError::Fatal {
                    log: format!("could not run fetch for {}: {}", url, e),
                })
            }
        };
        if out.success {
            return Ok(attempt);
        }

        let kind = classify_output(&out.output);
        match policy.decide(attempt, kind) {
            RetryDecision::RetryAfter(d) => {
                tracing::debug!(url, attempt, delay_ms = d.as_millis() as u64, "transient fetch failure, retrying");
                std::thread::sleep(d);
                attempt += 1;
            }
            RetryDecision::NoRetry => {
                // Nothing usable is left in dest after a terminal failure.
                let _ = remove_partial(dest);
                return Err(match kind {
                    ErrorKind::Transient => AttemptError::RetryExhausted {
                        attempts: attempt,
                        log: out.output,
                    },
                    ErrorKind::Fatal => AttemptError::Fatal { log: out.output },
                });
            }
        }
    }
}

fn remove_partial(dest: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
