//! Core mailbox traits shared by the bounded and unbounded implementations.

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use crate::message::{Message, MessageEnvelope};

/// Receiving half of a mailbox. Owned exclusively by the actor that reads
/// from it, unlike `MailboxSender`, this is never cloned.
#[async_trait]
pub trait MailboxReceiver<M: Message>: Send + Sync {
    type Error: Error + Send + Sync + 'static;

    /// Wait for the next message. `None` means the mailbox is closed and
    /// drained.
    async fn recv(&mut self) -> Option<MessageEnvelope<M>>;

    /// Non-blocking receive.
    fn try_recv(&mut self) -> Result<MessageEnvelope<M>, TryRecvError>;

    fn capacity(&self) -> MailboxCapacity;

    /// Approximate current depth (based on sent/received counters).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sending half of a mailbox. Cloneable so every stream/peer source that
/// feeds one inbox can hold its own handle.
#[async_trait]
pub trait MailboxSender<M: Message>: Send + Sync + Clone {
    type Error: Error + Send + Sync + 'static;

    async fn send(&self, envelope: MessageEnvelope<M>) -> Result<(), Self::Error>;

    fn try_send(&self, envelope: MessageEnvelope<M>) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxCapacity {
    Bounded(usize),
    Unbounded,
}

#[derive(Debug, thiserror::Error)]
pub enum MailboxError {
    #[error("mailbox is full (capacity: {capacity})")]
    Full { capacity: usize },

    #[error("mailbox is closed")]
    Closed,

    #[error("backpressure applied: {strategy}")]
    BackpressureApplied {
        strategy: crate::mailbox::BackpressureStrategy,
    },

    #[error("TTL expired for message received at {timestamp}")]
    TtlExpired { timestamp: DateTime<Utc> },
}

#[derive(Debug, thiserror::Error)]
pub enum TryRecvError {
    #[error("mailbox is empty")]
    Empty,

    #[error("mailbox is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_equality() {
        assert_eq!(MailboxCapacity::Bounded(100), MailboxCapacity::Bounded(100));
        assert_ne!(MailboxCapacity::Bounded(100), MailboxCapacity::Unbounded);
    }

    #[test]
    fn error_display_includes_capacity() {
        let err = MailboxError::Full { capacity: 32 };
        assert!(err.to_string().contains("32"));
    }

    #[test]
    fn try_recv_error_display() {
        assert_eq!(TryRecvError::Empty.to_string(), "mailbox is empty");
        assert_eq!(TryRecvError::Closed.to_string(), "mailbox is closed");
    }
}
