//! Error taxonomy for construction and configuration failures.
//!
//! Steady-state failures (decode errors, unexpected mailbox traffic, a lost
//! peer reply) are intentionally *not* represented here, `spec.md` §7 treats
//! those as log-and-continue, not `Result` failures. `AppError` covers only
//! the failures that are fatal at startup.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Fatal, startup-time errors. The binary prints these to stderr and exits
/// non-zero; nothing past construction ever produces one.
#[derive(Debug, Error)]
pub enum AppError {
    /// The `-c/--config` file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// CLI argument parsing failed (e.g. `-c` with no following path).
    #[error("invalid arguments: {0}")]
    Cli(String),

    /// Registering as a stream consumer/producer on the bus failed. Per
    /// `spec.md` §4.5, this is fatal: the actor aborts construction and the
    /// process signals "init failed".
    #[error("bus registration failed: {0}")]
    BusRegistration(String),
}
