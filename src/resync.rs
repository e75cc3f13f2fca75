//! Ready/Resyncing state machine gating metric publication during a
//! topology resync (`spec.md` §4.4).

use crate::queue::AssetQueryQueue;

/// Publication readiness. Only `Ready` allows the publisher to write to the
/// metric sink; `Resyncing` tracks the monotonic second the resync began so
/// the watchdog can force it back to ready after a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResyncState {
    Ready,
    Resyncing { started_mono: i64 },
}

/// Drives the transition between `Ready` and `Resyncing`, tracking the two
/// sub-flags (`ready_assets`, `ready_alerts`) that both need to flip before
/// the controller considers itself ready again.
#[derive(Debug)]
pub struct ResyncController {
    state: ResyncState,
    ready_assets: bool,
    ready_alerts: bool,
    pub queries: AssetQueryQueue,
}

impl Default for ResyncController {
    fn default() -> Self {
        Self {
            state: ResyncState::Ready,
            ready_assets: true,
            ready_alerts: true,
            queries: AssetQueryQueue::new(),
        }
    }
}

impl ResyncController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ResyncState::Ready)
    }

    pub fn state(&self) -> ResyncState {
        self.state
    }

    /// Enters `Resyncing`, clearing both sub-flags and the query queue. The
    /// caller is responsible for clearing the asset/alert stores and issuing
    /// the two mailbox requests described in `spec.md` §4.4. This only
    /// tracks the state-machine bookkeeping.
    pub fn begin_resync(&mut self, now_mono: i64) {
        self.state = ResyncState::Resyncing {
            started_mono: now_mono,
        };
        self.ready_assets = false;
        self.ready_alerts = false;
        self.queries.reset();
    }

    /// Called once the `fty-alert-list` reply has been fully replayed.
    pub fn on_alerts_loaded(&mut self) -> bool {
        self.ready_alerts = true;
        self.on_progress()
    }

    /// Called after `drain_queries` reports the asset-detail queue fully
    /// drained with nothing outstanding.
    pub fn on_assets_drained(&mut self) -> bool {
        if self.queries.is_drained() {
            self.ready_assets = true;
        }
        self.on_progress()
    }

    /// `true` iff both sub-flags just became true, transitioning to `Ready`.
    /// The caller should run a full recompute-and-publish when this returns
    /// `true`.
    fn on_progress(&mut self) -> bool {
        if self.ready_assets && self.ready_alerts && !self.is_ready() {
            self.state = ResyncState::Ready;
            true
        } else {
            false
        }
    }

    /// Forces readiness if the resync has been stuck past `2 * poller_timeout`
    /// monotonic seconds, so a lost reply can't wedge the process forever.
    pub fn watchdog_check(&mut self, now_mono: i64, poller_timeout_secs: i64) -> bool {
        let ResyncState::Resyncing { started_mono } = self.state else {
            return false;
        };
        if now_mono > started_mono + 2 * poller_timeout_secs {
            self.ready_assets = true;
            self.ready_alerts = true;
            self.on_progress()
        } else {
            false
        }
    }
}
