//! Metrics recorder trait for mailbox operations.

use chrono::{DateTime, Utc};

/// Records sent/received/dropped counters for a single mailbox.
///
/// Kept as a trait (`R: MetricsRecorder`, never `dyn`) so the counters stay
/// a compile-time choice per mailbox instance.
pub trait MetricsRecorder: Send + Sync {
    fn record_sent(&self);
    fn record_received(&self);

    /// Backpressure drop or TTL expiry: the only two cases a mailbox
    /// silently discards a message.
    fn record_dropped(&self);

    fn update_last_message(&self, timestamp: DateTime<Utc>);

    fn sent_count(&self) -> u64;
    fn received_count(&self) -> u64;
    fn dropped_count(&self) -> u64;
    fn last_message_at(&self) -> Option<DateTime<Utc>>;

    /// `sent_count - received_count`, saturating so a miscount never
    /// underflows into a bogus `u64::MAX`.
    fn in_flight(&self) -> u64 {
        self.sent_count().saturating_sub(self.received_count())
    }
}
