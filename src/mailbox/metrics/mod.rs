//! Per-mailbox metrics recording.
//!
//! `MetricsRecorder` is a trait rather than a concrete struct so mailboxes
//! stay generic over it (`BoundedMailbox<M, R: MetricsRecorder>`); the
//! in-memory bus and tests both use [`AtomicMetrics`].

mod atomic;
mod recorder;

pub use atomic::AtomicMetrics;
pub use recorder::MetricsRecorder;
