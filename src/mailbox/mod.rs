//! Mailbox infrastructure backing the actor's three inboxes.
//!
//! The aggregator actor owns one `BoundedMailbox` per inbox described in
//! `spec.md` §2 (Control, Stream, Mailbox): bounded so a wedged peer or a
//! runaway stream can't grow memory without bound, with a backpressure
//! strategy chosen per inbox (see [`BackpressureStrategy`]). The internal
//! asset-detail query queue (`queue::AssetQueryQueue`) is capped at the
//! application layer instead (§4.4's 32 outstanding queries), so it doesn't
//! need a mailbox of its own.

pub mod backpressure;
pub mod bounded;
pub mod metrics;
pub mod traits;

pub use backpressure::BackpressureStrategy;
pub use bounded::{BoundedMailbox, BoundedMailboxSender};
pub use metrics::{AtomicMetrics, MetricsRecorder};
pub use traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
