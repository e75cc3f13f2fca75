//! In-process metric storage the publisher writes to and the `Mailbox`
//! inbox's `METRICS` query reads back from.
//!
//! Backed by `DashMap` rather than a `Mutex<HashMap<_>>` since reads and
//! writes both happen on the actor's single task but the sink is also the
//! natural seam for a future out-of-process exporter to poll concurrently.

use dashmap::DashMap;

/// One published sample: the gauge value, the TTL it was published with, and
/// the wall-clock second it landed, so a consumer can tell whether it's
/// stale without re-deriving the publish window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishedMetric {
    pub value: i64,
    pub ttl_secs: i64,
    pub published_at: i64,
}

/// Storage for published `alerts.active.{warning,critical}` gauges, keyed by
/// `(asset, metric_name)`.
pub trait MetricSink {
    fn write(&self, asset: &str, metric: &str, value: i64, ttl_secs: i64, now_wall_secs: i64);
    fn read(&self, asset: &str, metric: &str) -> Option<PublishedMetric>;
}

#[derive(Debug, Default)]
pub struct InMemoryMetricSink {
    values: DashMap<(String, String), PublishedMetric>,
}

impl InMemoryMetricSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl MetricSink for InMemoryMetricSink {
    fn write(&self, asset: &str, metric: &str, value: i64, ttl_secs: i64, now_wall_secs: i64) {
        self.values.insert(
            (asset.to_string(), metric.to_string()),
            PublishedMetric {
                value,
                ttl_secs,
                published_at: now_wall_secs,
            },
        );
    }

    fn read(&self, asset: &str, metric: &str) -> Option<PublishedMetric> {
        self.values
            .get(&(asset.to_string(), metric.to_string()))
            .map(|entry| *entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let sink = InMemoryMetricSink::new();
        sink.write("rack-6", "alerts.active.warning", 3, 720, 1_000);

        let metric = sink.read("rack-6", "alerts.active.warning").unwrap();
        assert_eq!(metric.value, 3);
        assert_eq!(metric.ttl_secs, 720);
        assert_eq!(metric.published_at, 1_000);
    }

    #[test]
    fn unknown_key_reads_as_none() {
        let sink = InMemoryMetricSink::new();
        assert!(sink.read("rack-6", "alerts.active.critical").is_none());
    }

    #[test]
    fn overwrite_replaces_previous_sample() {
        let sink = InMemoryMetricSink::new();
        sink.write("rack-6", "alerts.active.warning", 1, 720, 1_000);
        sink.write("rack-6", "alerts.active.warning", 2, 720, 1_010);

        let metric = sink.read("rack-6", "alerts.active.warning").unwrap();
        assert_eq!(metric.value, 2);
        assert_eq!(metric.published_at, 1_010);
    }
}
