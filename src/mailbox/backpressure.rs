//! Backpressure strategies for bounded mailboxes.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::traits::MailboxError;
use crate::message::{Message, MessageEnvelope};

/// Strategy applied when a bounded mailbox's inbox is full.
///
/// All three of the actor's inboxes (Control, Stream, Mailbox) are
/// constructed with the default `Error` strategy: a full inbox means the
/// actor has fallen behind, and the sender finding out immediately is more
/// useful than either silently dropping the message or blocking the caller
/// indefinitely. `Block` and `Drop` exist for callers (tests, or a future
/// inbox) that need a different tradeoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BackpressureStrategy {
    /// Wait asynchronously until space is available.
    Block,

    /// Drop the incoming message silently.
    Drop,

    /// Return an error to the sender immediately.
    #[default]
    Error,
}

impl fmt::Display for BackpressureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "Block"),
            Self::Drop => write!(f, "Drop"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl BackpressureStrategy {
    pub async fn apply<M: Message>(
        &self,
        sender: &mpsc::Sender<MessageEnvelope<M>>,
        envelope: MessageEnvelope<M>,
    ) -> Result<(), MailboxError> {
        match self {
            Self::Block => sender.send(envelope).await.map_err(|_| MailboxError::Closed),
            Self::Drop => match sender.try_send(envelope) {
                Ok(()) => Ok(()),
                Err(mpsc::error::TrySendError::Full(_)) => Ok(()),
                Err(mpsc::error::TrySendError::Closed(_)) => Err(MailboxError::Closed),
            },
            Self::Error => sender.try_send(envelope).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => MailboxError::Full {
                    capacity: sender.max_capacity(),
                },
                mpsc::error::TrySendError::Closed(_) => MailboxError::Closed,
            }),
        }
    }
}
