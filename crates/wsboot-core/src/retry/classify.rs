//! Classify captured fetch output into retry policy error kinds.

use super::policy::ErrorKind;

/// Prefixes ssh puts on errors raised during the identification exchange.
pub const HANDSHAKE_PREFIXES: &[&str] = &["ssh_exchange_identification", "kex_exchange_identification"];

/// How the server dropped the connection. Only transient on a line that also
/// carries one of [`HANDSHAKE_PREFIXES`].
pub const HANDSHAKE_SIGNATURES: &[&str] = &["connection closed by remote host", "connection reset by peer"];

/// Classify the combined output of a failed fetch. Matching is per line and
/// case-insensitive.
pub fn classify_output(output: &str) -> ErrorKind {
    let handshake_drop = output.lines().any(|line| {
        let line = line.to_ascii_lowercase();
        HANDSHAKE_PREFIXES.iter().any(|p| line.contains(p))
            && HANDSHAKE_SIGNATURES.iter().any(|sig| line.contains(sig))
    });
    if handshake_drop {
        ErrorKind::Transient
    } else {
        ErrorKind::Fatal
    }
}
