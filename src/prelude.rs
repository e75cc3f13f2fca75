//! Convenience re-exports for binaries and integration tests.
//!
//! ```rust
//! use fty_alert_stats::prelude::*;
//! ```

pub use crate::actor::AggregatorActor;
pub use crate::bus::{BusClient, ControlMessage, MailboxReply, MailboxRequest, StreamMessage};
pub use crate::config::Config;
pub use crate::counters::{AlertCount, CounterEngine};
pub use crate::domain::{Alert, AlertState, Asset, AssetEvent, AssetOperation, Severity};
pub use crate::error::AppError;
pub use crate::mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
};
pub use crate::message::{Message, MessageEnvelope};
pub use crate::resync::{ResyncController, ResyncState};
