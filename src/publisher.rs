//! Metric publication gating: resync inhibition, the container-name filter,
//! and the recursive upward republish (`spec.md` §4.3).

use crate::counters::CounterEngine;
use crate::domain::is_container_asset;
use crate::metrics_sink::MetricSink;
use crate::state::AssetStore;

/// A sentinel `lastSent` value for non-container assets: large enough that
/// `lastSent + metricTtl/2 <= now` never holds, so the tick-driven refresh
/// in `actor.rs` never tries to republish a bucket that was never surfaced.
pub const NEVER_REFRESH: i64 = i64::MAX / 2;

const WARNING_METRIC: &str = "alerts.active.warning";
const CRITICAL_METRIC: &str = "alerts.active.critical";

/// Publishes `CounterEngine` buckets to a `MetricSink`, subject to the
/// readiness and container-name gates from `spec.md` §4.3.
pub struct MetricPublisher {
    pub metric_ttl_secs: i64,
}

impl MetricPublisher {
    pub fn new(metric_ttl_secs: i64) -> Self {
        Self { metric_ttl_secs }
    }

    /// Publishes one asset's bucket, then (if `recursive`) its parent's, and
    /// so on up the chain. `ready` gates the whole call: while resyncing,
    /// nothing is published at all.
    pub fn publish(
        &self,
        asset: &str,
        recursive: bool,
        ready: bool,
        assets: &AssetStore,
        counters: &mut CounterEngine,
        sink: &impl MetricSink,
        now_wall_secs: i64,
    ) {
        if !ready {
            return;
        }
        self.publish_one(asset, recursive, assets, counters, sink, now_wall_secs);
    }

    fn publish_one(
        &self,
        asset: &str,
        recursive: bool,
        assets: &AssetStore,
        counters: &mut CounterEngine,
        sink: &impl MetricSink,
        now_wall_secs: i64,
    ) {
        if !is_container_asset(asset) {
            if let Some(count) = counters.get_mut(asset) {
                count.last_sent = NEVER_REFRESH;
            }
            return;
        }

        let Some(count) = counters.get(asset) else {
            return;
        };
        let (warning, critical) = (count.warning, count.critical);

        sink.write(asset, WARNING_METRIC, warning, self.metric_ttl_secs, now_wall_secs);
        sink.write(asset, CRITICAL_METRIC, critical, self.metric_ttl_secs, now_wall_secs);

        if let Some(count) = counters.get_mut(asset) {
            count.last_sent = now_wall_secs;
        }

        if !recursive {
            return;
        }

        let Some(parent) = assets.get(asset).and_then(|a| a.parent.clone()) else {
            return;
        };
        if counters.get(&parent).is_none() {
            return;
        }
        self.publish_one(&parent, true, assets, counters, sink, now_wall_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Alert, AlertState, AssetEvent, AssetOperation, Severity};
    use crate::metrics_sink::InMemoryMetricSink;
    use crate::state::AlertStore;

    fn topology_with_alert() -> (AssetStore, AlertStore, CounterEngine) {
        let mut assets = AssetStore::new();
        let mut alerts = AlertStore::new();
        let mut engine = CounterEngine::new();

        for (name, parent) in [
            ("rack-6", Some("row-5")),
            ("row-5", Some("room-4")),
            ("room-4", Some("datacenter-3")),
            ("datacenter-3", None),
        ] {
            assets.process_asset(
                AssetEvent {
                    operation: AssetOperation::Create,
                    name: name.to_string(),
                    parent: parent.map(str::to_string),
                },
                &alerts,
                &mut engine,
            );
        }

        alerts.process_alert(
            Alert {
                rule: "r1".into(),
                asset: "rack-6".into(),
                state: AlertState::Active,
                severity: Severity::Critical,
                time: 0,
                ttl: 3600,
            },
            &assets,
            &mut engine,
        );

        (assets, alerts, engine)
    }

    #[test]
    fn resync_inhibits_publication() {
        let (assets, _alerts, mut engine) = topology_with_alert();
        let sink = InMemoryMetricSink::new();
        let publisher = MetricPublisher::new(720);

        publisher.publish("rack-6", true, false, &assets, &mut engine, &sink, 1_000);

        assert!(sink.is_empty());
    }

    #[test]
    fn non_container_asset_gets_sentinel_and_no_write() {
        let mut assets = AssetStore::new();
        let alerts = AlertStore::new();
        let mut engine = CounterEngine::new();
        assets.process_asset(
            AssetEvent {
                operation: AssetOperation::Create,
                name: "server-7".into(),
                parent: None,
            },
            &alerts,
            &mut engine,
        );
        engine.recompute_all(&assets, &alerts);

        let sink = InMemoryMetricSink::new();
        let publisher = MetricPublisher::new(720);
        publisher.publish("server-7", false, true, &assets, &mut engine, &sink, 1_000);

        assert!(sink.is_empty());
        assert_eq!(engine.get("server-7").unwrap().last_sent, NEVER_REFRESH);
    }

    #[test]
    fn recursive_publish_walks_to_root() {
        let (assets, _alerts, mut engine) = topology_with_alert();
        let sink = InMemoryMetricSink::new();
        let publisher = MetricPublisher::new(720);

        publisher.publish("rack-6", true, true, &assets, &mut engine, &sink, 1_000);

        for asset in ["rack-6", "row-5", "room-4", "datacenter-3"] {
            let metric = sink.read(asset, "alerts.active.critical").unwrap();
            assert_eq!(metric.value, 1);
            assert_eq!(metric.published_at, 1_000);
            assert_eq!(engine.get(asset).unwrap().last_sent, 1_000);
        }
    }

    #[test]
    fn non_recursive_publish_touches_only_the_named_asset() {
        let (assets, _alerts, mut engine) = topology_with_alert();
        let sink = InMemoryMetricSink::new();
        let publisher = MetricPublisher::new(720);

        publisher.publish("rack-6", false, true, &assets, &mut engine, &sink, 1_000);

        assert!(sink.read("rack-6", "alerts.active.critical").is_some());
        assert!(sink.read("row-5", "alerts.active.critical").is_none());
    }
}
