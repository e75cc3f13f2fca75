//! Bounded-concurrency queue for outstanding `ASSET_DETAIL` resync queries
//! (`spec.md` §4.4, §5, §9; the 32-query cap is hardcoded upstream too).

use std::collections::VecDeque;

/// Maximum number of `ASSET_DETAIL` requests in flight at once during a
/// resync. Not configurable: the source this was distilled from hardcodes
/// it, and no operator-facing need to change it has come up.
pub const MAX_OUTSTANDING_QUERIES: usize = 32;

/// Names still waiting to be queried, plus a count of requests sent but not
/// yet replied to.
#[derive(Debug, Default)]
pub struct AssetQueryQueue {
    pending: VecDeque<String>,
    outstanding: usize,
}

impl AssetQueryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.outstanding = 0;
    }

    /// Clears just the in-flight count, leaving the pending queue intact.
    /// Used when a fresh `ASSETS_IN_CONTAINER` reply resets the budget
    /// before enqueuing the names it carried.
    pub fn reset_outstanding(&mut self) {
        self.outstanding = 0;
    }

    pub fn enqueue_all(&mut self, names: impl IntoIterator<Item = String>) {
        self.pending.extend(names);
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn is_drained(&self) -> bool {
        self.pending.is_empty() && self.outstanding == 0
    }

    /// Pops as many names as the outstanding budget allows, incrementing the
    /// outstanding count for each one the caller manages to send (tracked
    /// via `mark_sent`, since a send that fails to enqueue shouldn't count
    /// against the budget, `spec.md` §7's "peer query send failure" row).
    pub fn drain_queries(&mut self) -> Vec<String> {
        let mut drained = Vec::new();
        while self.outstanding < MAX_OUTSTANDING_QUERIES {
            match self.pending.pop_front() {
                Some(name) => {
                    self.outstanding += 1;
                    drained.push(name);
                }
                None => break,
            }
        }
        drained
    }

    /// Called when a previously drained query's send failed, so it doesn't
    /// silently count against the outstanding budget forever.
    pub fn mark_send_failed(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    /// Called when an `ASSET_DETAIL` reply has been processed.
    pub fn on_reply(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_respects_outstanding_cap() {
        let mut queue = AssetQueryQueue::new();
        queue.enqueue_all((0..40).map(|i| format!("asset-{i}")));

        let drained = queue.drain_queries();
        assert_eq!(drained.len(), MAX_OUTSTANDING_QUERIES);
        assert_eq!(queue.outstanding(), MAX_OUTSTANDING_QUERIES);
        assert!(!queue.is_drained());
    }

    #[test]
    fn reply_frees_a_slot_for_more_draining() {
        let mut queue = AssetQueryQueue::new();
        queue.enqueue_all((0..40).map(|i| format!("asset-{i}")));
        queue.drain_queries();

        queue.on_reply();
        let more = queue.drain_queries();

        assert_eq!(more.len(), 1);
        assert_eq!(queue.outstanding(), MAX_OUTSTANDING_QUERIES);
    }

    #[test]
    fn empty_queue_with_no_outstanding_is_drained() {
        let queue = AssetQueryQueue::new();
        assert!(queue.is_drained());
    }

    #[test]
    fn send_failure_releases_the_slot_without_a_reply() {
        let mut queue = AssetQueryQueue::new();
        queue.enqueue_all(["asset-0".to_string()]);
        queue.drain_queries();

        queue.mark_send_failed();

        assert_eq!(queue.outstanding(), 0);
        assert!(queue.is_drained());
    }
}
