//! Generic envelope wrapping a mailbox payload with delivery metadata.

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::traits::Message;

/// Wraps a payload `M` with a receipt timestamp and optional TTL.
///
/// Kept generic (rather than folding timestamp/TTL into each payload type)
/// so the same `BoundedMailbox<M>` plumbing serves the Control, Stream, and
/// Mailbox inboxes without duplicating delivery bookkeeping three times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope<M: Message> {
    pub payload: M,
    pub timestamp: DateTime<Utc>,
    /// Optional time-to-live in seconds; `None` never expires.
    pub ttl: Option<u64>,
}

impl<M: Message> MessageEnvelope<M> {
    pub fn new(payload: M) -> Self {
        Self {
            payload,
            timestamp: Utc::now(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl = Some(ttl_seconds);
        self
    }

    pub fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => {
                let age = Utc::now()
                    .signed_duration_since(self.timestamp)
                    .num_seconds()
                    .max(0) as u64;
                age > ttl
            }
            None => false,
        }
    }

    pub fn message_type(&self) -> &'static str {
        M::MESSAGE_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestMessage;

    impl Message for TestMessage {
        const MESSAGE_TYPE: &'static str = "test_message";
    }

    #[test]
    fn envelope_without_ttl_never_expires() {
        let envelope = MessageEnvelope::new(TestMessage);
        assert!(!envelope.is_expired());
    }

    #[test]
    fn envelope_with_elapsed_ttl_is_expired() {
        let mut envelope = MessageEnvelope::new(TestMessage).with_ttl(1);
        envelope.timestamp = Utc::now() - chrono::Duration::seconds(5);
        assert!(envelope.is_expired());
    }

    #[test]
    fn message_type_reflects_const() {
        let envelope = MessageEnvelope::new(TestMessage);
        assert_eq!(envelope.message_type(), "test_message");
    }
}
