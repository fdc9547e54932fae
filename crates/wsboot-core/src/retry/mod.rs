//! Clone retry engine.
//!
//! Classifies fetch failures (handshake resets are transient, everything
//! else is fatal for that remote) and applies a capped, jittered
//! exponential backoff so callers share a consistent policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify_output, HANDSHAKE_PREFIXES, HANDSHAKE_SIGNATURES};
pub use error::AttemptError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::attempt;
