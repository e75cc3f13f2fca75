//! Per-asset warning/critical tallies and the delta recomputation that keeps
//! them in sync with the alert store (`spec.md` §4.2).

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Alert, Asset, AssetEvent, AssetOperation};
#[cfg(test)]
use crate::domain::{AlertState, Severity};
use crate::state::{AlertHooks, AssetHooks, AlertStore, AssetStore};

/// Running warning/critical tally for one asset bucket.
///
/// `last_sent` is wall-clock seconds of the last successful publish, reset
/// to zero whenever either count changes so the publisher knows the bucket
/// needs to go out again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertCount {
    pub warning: i64,
    pub critical: i64,
    pub last_sent: i64,
}

impl AlertCount {
    fn apply_delta(&mut self, delta_warning: i64, delta_critical: i64) {
        if delta_warning == 0 && delta_critical == 0 {
            return;
        }
        self.warning += delta_warning;
        self.critical += delta_critical;
        self.last_sent = 0;
    }
}

/// A bucket whose counters changed this tick and needs to be (re)published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub asset: String,
    /// `true` for the ancestor-walk case (ASSETS changes, which can move a
    /// whole subtree): every bucket from `asset` up to the root republishes.
    pub recursive: bool,
}

/// Per-asset `AlertCount` table plus the delta math that keeps it correct as
/// asset and alert events arrive.
///
/// Supplied to `AssetStore`/`AlertStore` as an `AssetHooks`/`AlertHooks`
/// implementor rather than owning the stores itself. The stores stay
/// reusable and the counter semantics live entirely in this one place.
#[derive(Debug, Default)]
pub struct CounterEngine {
    counters: HashMap<String, AlertCount>,
    pending: Vec<PublishRequest>,
}

impl CounterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: &str) -> Option<&AlertCount> {
        self.counters.get(asset)
    }

    pub fn get_mut(&mut self, asset: &str) -> Option<&mut AlertCount> {
        self.counters.get_mut(asset)
    }

    /// Buckets whose `last_sent` has fallen far enough behind `now_wall_secs`
    /// to need a TTL-driven refresh, per the tick handler's republish rule
    /// (`spec.md` §4.5: `lastSent + metricTTL/2 <= now`).
    pub fn stale_buckets(&self, now_wall_secs: i64, half_ttl_secs: i64) -> Vec<String> {
        self.counters
            .iter()
            .filter(|(_, count)| count.last_sent + half_ttl_secs <= now_wall_secs)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.counters.clear();
        self.pending.clear();
    }

    /// Drains the buckets queued for publication since the last call.
    pub fn take_pending(&mut self) -> Vec<PublishRequest> {
        std::mem::take(&mut self.pending)
    }

    fn queue(&mut self, asset: &str, recursive: bool) {
        self.pending.push(PublishRequest {
            asset: asset.to_string(),
            recursive,
        });
    }

    /// Applies `(delta_warning, delta_critical)` to `start`'s bucket, then
    /// walks the parent chain applying the same delta to each ancestor.
    ///
    /// `start` always gets a bucket, created on the fly if the asset is
    /// unknown, but the walk only continues past an asset that is present
    /// in `assets` and whose parent is also present; a missing link or an
    /// absent parent silently terminates it (`spec.md` §4.2, §7).
    fn apply_delta_up_chain(
        &mut self,
        start: &str,
        delta_warning: i64,
        delta_critical: i64,
        assets: &AssetStore,
    ) {
        self.counters
            .entry(start.to_string())
            .or_default()
            .apply_delta(delta_warning, delta_critical);

        let mut current = start.to_string();
        loop {
            let Some(asset) = assets.get(&current) else {
                break;
            };
            let Some(parent) = asset.parent.as_ref() else {
                break;
            };
            if assets.get(parent).is_none() {
                break;
            }
            self.counters
                .entry(parent.clone())
                .or_default()
                .apply_delta(delta_warning, delta_critical);
            current = parent.clone();
        }
    }

    /// Computes and applies the delta between `prev` (the alert as it stood
    /// in the store, if any) and `new` (the incoming event), returning
    /// `true` iff any bucket actually changed.
    ///
    /// Implements the case table from `spec.md` §4.2: a brand new active
    /// alert contributes `+contrib(severity)`; one that stops being active
    /// contributes `-contrib(severity)`; one that starts being active
    /// contributes `+contrib(severity)`; one that stays active but changes
    /// severity contributes the difference. Everything else is a no-op.
    fn recompute_alert(&mut self, prev: Option<&Alert>, new: &Alert, assets: &AssetStore) -> bool {
        let (dw, dc) = match prev {
            None => {
                if new.state.is_active() {
                    new.severity.contribution()
                } else {
                    (0, 0)
                }
            }
            Some(prev) => {
                let was_active = prev.state.is_active();
                let is_active = new.state.is_active();
                match (was_active, is_active) {
                    (true, false) => {
                        let (w, c) = prev.severity.contribution();
                        (-w, -c)
                    }
                    (false, true) => new.severity.contribution(),
                    (true, true) if prev.severity != new.severity => {
                        let (pw, pc) = prev.severity.contribution();
                        let (nw, nc) = new.severity.contribution();
                        (nw - pw, nc - pc)
                    }
                    _ => (0, 0),
                }
            }
        };

        if dw == 0 && dc == 0 {
            trace!(rule = %new.rule, asset = %new.asset, "non-interesting alert transition, no delta");
            return false;
        }
        trace!(rule = %new.rule, asset = %new.asset, delta_warning = dw, delta_critical = dc, "interesting alert transition");
        self.apply_delta_up_chain(&new.asset, dw, dc, assets);
        true
    }

    /// Rebuilds every bucket from scratch by replaying the full alert store
    /// against the current topology, then queues every resulting bucket for
    /// a non-recursive republish (`spec.md` §4.2 "Full recompute").
    ///
    /// Used whenever a topology change permutes ancestor chains globally:
    /// a targeted differential would be error-prone relative to the cost of
    /// just rebuilding.
    pub fn recompute_all(&mut self, assets: &AssetStore, alerts: &AlertStore) {
        self.counters.clear();
        for name in assets.names() {
            self.counters.entry(name.clone()).or_default();
        }
        for alert in alerts.values() {
            if alert.state.is_active() {
                let (w, c) = alert.severity.contribution();
                self.apply_delta_up_chain(&alert.asset, w, c, assets);
            }
        }
        let buckets: Vec<String> = self.counters.keys().cloned().collect();
        for bucket in buckets {
            self.queue(&bucket, false);
        }
    }

    /// Initializes a freshly created asset's bucket and folds in any alerts
    /// already attached to it, then queues a recursive republish. A create
    /// can inherit counts from alerts that arrived while the asset was
    /// still unknown (`spec.md` §4.2 asset post-hook, `CREATE` case).
    fn asset_created(&mut self, name: &str, assets: &AssetStore, alerts: &AlertStore) {
        self.counters.entry(name.to_string()).or_default();
        for alert in alerts.values().filter(|a| a.asset == name && a.state.is_active()) {
            let (w, c) = alert.severity.contribution();
            self.apply_delta_up_chain(name, w, c, assets);
        }
        self.queue(name, true);
    }
}

impl AssetHooks for CounterEngine {
    /// Drops `INVENTORY` outright and drops an `UPDATE` that doesn't change
    /// `parent`, topology-irrelevant noise the engine has no reason to
    /// react to (`spec.md` §4.2 asset pre-hook).
    fn pre(&mut self, existing: Option<&Asset>, event: &AssetEvent) -> bool {
        match event.operation {
            AssetOperation::Inventory => false,
            AssetOperation::Update => match existing {
                Some(existing) => existing.parent != event.parent,
                None => true,
            },
            AssetOperation::Create | AssetOperation::Delete | AssetOperation::Retire => true,
        }
    }

    /// `CREATE` gets the dedicated alert-rescan treatment; every other
    /// accepted op (a topology-changing `UPDATE`, or a `DELETE`/`RETIRE`)
    /// invalidates ancestor chains globally and gets a full recompute
    /// (`spec.md` §4.2 asset post-hook).
    fn post(&mut self, event: &AssetEvent, assets: &AssetStore, alerts: &AlertStore, _removed: bool) {
        match event.operation {
            AssetOperation::Create => self.asset_created(&event.name, assets, alerts),
            AssetOperation::Update | AssetOperation::Delete | AssetOperation::Retire => {
                self.recompute_all(assets, alerts)
            }
            AssetOperation::Inventory => {}
        }
    }
}

impl AlertHooks for CounterEngine {
    /// Always accepts; the delta computation reads `prev`/`new` directly
    /// and doesn't depend on whether the store has been mutated yet, so it
    /// runs in `post` rather than here (`spec.md` §4.2 describes the delta
    /// as happening in the alert pre-hook, but the two are equivalent since
    /// `recompute_alert` never consults the store itself).
    fn pre(&mut self, _existing: Option<&Alert>, _new: &Alert, _assets: &AssetStore) -> bool {
        true
    }

    fn post(&mut self, prev: Option<&Alert>, new: &Alert, assets: &AssetStore, _removed: bool) {
        if self.recompute_alert(prev, new, assets) {
            self.queue(&new.asset, false);
        }
    }
}
