//! In-process `BusClient` used by tests and by the standalone binary when no
//! external transport is wired in.
//!
//! Outbound mailbox sends are forwarded as `(peer, subject, request)`
//! tuples over an unbounded channel. A test harness drains the paired
//! receiver and replies directly into the actor's Mailbox inbox sender,
//! standing in for `asset-agent`/`fty-alert-list` without simulating a real
//! peer protocol.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::messages::MailboxRequest;
use super::traits::{BusClient, BusError};

pub type OutboundMailboxSend = (String, String, MailboxRequest);

#[derive(Debug)]
pub struct InMemoryBus {
    outbound: mpsc::UnboundedSender<OutboundMailboxSend>,
    fail_registration: bool,
}

impl InMemoryBus {
    /// Returns the client plus the receiver a test harness observes
    /// outbound sends on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundMailboxSend>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                outbound: tx,
                fail_registration: false,
            },
            rx,
        )
    }

    /// Builds a client whose `register` always fails, for exercising the
    /// fatal-construction-error path.
    pub fn new_failing() -> (Self, mpsc::UnboundedReceiver<OutboundMailboxSend>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                outbound: tx,
                fail_registration: true,
            },
            rx,
        )
    }
}

#[async_trait]
impl BusClient for InMemoryBus {
    async fn register(&mut self) -> Result<(), BusError> {
        if self.fail_registration {
            return Err(BusError::RegistrationFailed(
                "in-memory bus configured to fail registration".to_string(),
            ));
        }
        Ok(())
    }

    async fn send_mailbox(&self, peer: &str, subject: &str, request: MailboxRequest) -> Result<(), BusError> {
        self.outbound
            .send((peer.to_string(), subject.to_string(), request))
            .map_err(|_| BusError::SendFailed {
                peer: peer.to_string(),
                reason: "receiver dropped".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_succeeds_by_default() {
        let (mut bus, _rx) = InMemoryBus::new();
        assert!(bus.register().await.is_ok());
    }

    #[tokio::test]
    async fn new_failing_reports_registration_error() {
        let (mut bus, _rx) = InMemoryBus::new_failing();
        assert!(bus.register().await.is_err());
    }

    #[tokio::test]
    async fn send_mailbox_is_observable_by_a_harness() {
        let (bus, mut rx) = InMemoryBus::new();
        bus.send_mailbox("asset-agent", "ASSETS_IN_CONTAINER", MailboxRequest::AssetsInContainer)
            .await
            .unwrap();

        let (peer, subject, request) = rx.recv().await.unwrap();
        assert_eq!(peer, "asset-agent");
        assert_eq!(subject, "ASSETS_IN_CONTAINER");
        assert_eq!(request, MailboxRequest::AssetsInContainer);
    }

    #[tokio::test]
    async fn send_after_receiver_dropped_reports_failure() {
        let (bus, rx) = InMemoryBus::new();
        drop(rx);

        let result = bus
            .send_mailbox("asset-agent", "ASSET_DETAIL", MailboxRequest::AssetDetail { name: "rack-1".into() })
            .await;
        assert!(result.is_err());
    }
}
