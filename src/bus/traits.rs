//! The bus collaborator boundary: stream/producer registration and
//! outbound mailbox sends, kept behind a trait so the actor's event loop
//! never depends on a concrete transport.

use async_trait::async_trait;
use thiserror::Error;

use super::messages::MailboxRequest;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("failed to register as stream consumer: {0}")]
    RegistrationFailed(String),
    #[error("failed to send mailbox request to {peer}: {reason}")]
    SendFailed { peer: String, reason: String },
}

/// Outbound half of the bus collaborator described in `spec.md` §6.
///
/// Registration (streams + mailbox producer) happens once at construction
/// and is fatal on failure; mailbox sends happen continuously and are
/// logged-and-continued on failure per the error policy in §7.
#[async_trait]
pub trait BusClient: Send + Sync {
    /// Registers as a consumer of the `ASSETS` and `ALERTS` streams and as a
    /// producer on the mailbox address this actor answers to.
    async fn register(&mut self) -> Result<(), BusError>;

    /// Sends `request` to `peer`, addressed by subject. Failures are
    /// reported to the caller rather than panicking; the actor decides
    /// whether a failed send still counts against the outstanding-query
    /// budget (it doesn't, per §7).
    async fn send_mailbox(&self, peer: &str, subject: &str, request: MailboxRequest) -> Result<(), BusError>;
}
