//! End-to-end scenario matching the fixed topology and step sequence used
//! to validate the aggregation engine: asset creation, alert transitions,
//! resolution, a no-op ack, and a topology change that moves a whole
//! subtree to a new parent.

use fty_alert_stats::counters::CounterEngine;
use fty_alert_stats::state::{AlertStore, AssetStore};
use fty_alert_stats::{Alert, AlertState, AssetEvent, AssetOperation, Severity};

fn create_asset(assets: &mut AssetStore, alerts: &AlertStore, engine: &mut CounterEngine, name: &str, parent: Option<&str>) {
    assets.process_asset(
        AssetEvent {
            operation: AssetOperation::Create,
            name: name.to_string(),
            parent: parent.map(str::to_string),
        },
        alerts,
        engine,
    );
}

fn publish_alert(
    alerts: &mut AlertStore,
    assets: &AssetStore,
    engine: &mut CounterEngine,
    rule: &str,
    asset: &str,
    state: AlertState,
    severity: Severity,
) {
    alerts.process_alert(
        Alert {
            rule: rule.to_string(),
            asset: asset.to_string(),
            state,
            severity,
            time: 0,
            ttl: 3600,
        },
        assets,
        engine,
    );
}

fn counts(engine: &CounterEngine, asset: &str) -> (i64, i64) {
    let count = engine.get(asset).unwrap();
    (count.warning, count.critical)
}

#[test]
fn full_topology_scenario() {
    let mut assets = AssetStore::new();
    let mut alerts = AlertStore::new();
    let mut engine = CounterEngine::new();

    create_asset(&mut assets, &alerts, &mut engine, "datacenter-3", None);
    create_asset(&mut assets, &alerts, &mut engine, "datacenter-6", None);
    create_asset(&mut assets, &alerts, &mut engine, "rackcontroller-0", Some("datacenter-3"));
    create_asset(&mut assets, &alerts, &mut engine, "room-4", Some("datacenter-3"));
    create_asset(&mut assets, &alerts, &mut engine, "row-5", Some("room-4"));
    create_asset(&mut assets, &alerts, &mut engine, "rack-6", Some("row-5"));
    engine.take_pending();

    // Step 1: a warning on a non-container asset still bubbles up.
    publish_alert(
        &mut alerts,
        &assets,
        &mut engine,
        "alert1@rackcontroller-0",
        "rackcontroller-0",
        AlertState::Active,
        Severity::Warning,
    );
    assert_eq!(counts(&engine, "datacenter-3"), (1, 0));
    assert_eq!(counts(&engine, "rackcontroller-0"), (1, 0));

    // Step 2.
    publish_alert(&mut alerts, &assets, &mut engine, "alert2@row-5", "row-5", AlertState::Active, Severity::Warning);
    assert_eq!(counts(&engine, "row-5"), (1, 0));
    assert_eq!(counts(&engine, "room-4"), (1, 0));
    assert_eq!(counts(&engine, "datacenter-3"), (2, 0));

    // Step 3.
    publish_alert(&mut alerts, &assets, &mut engine, "alert3@room-4", "room-4", AlertState::Active, Severity::Critical);
    assert_eq!(counts(&engine, "room-4"), (1, 1));
    assert_eq!(counts(&engine, "datacenter-3"), (2, 1));

    // Step 4: resolve the rackcontroller-0 warning.
    publish_alert(
        &mut alerts,
        &assets,
        &mut engine,
        "alert1@rackcontroller-0",
        "rackcontroller-0",
        AlertState::Resolved,
        Severity::Warning,
    );
    assert_eq!(counts(&engine, "datacenter-3"), (1, 1));
    assert_eq!(counts(&engine, "room-4"), (1, 1));
    assert_eq!(counts(&engine, "row-5"), (1, 0));

    // Step 5: an ack on an already-resolved rule is a no-op. There is
    // nothing to reverse because the alert left the store in step 4.
    engine.take_pending();
    publish_alert(
        &mut alerts,
        &assets,
        &mut engine,
        "alert1@rackcontroller-0",
        "rackcontroller-0",
        AlertState::AckSilence,
        Severity::Warning,
    );
    assert!(engine.take_pending().is_empty());
    assert_eq!(counts(&engine, "datacenter-3"), (1, 1));

    // Step 6: reparent room-4 under datacenter-6. Full recompute follows.
    assets.process_asset(
        AssetEvent {
            operation: AssetOperation::Update,
            name: "room-4".to_string(),
            parent: Some("datacenter-6".to_string()),
        },
        &alerts,
        &mut engine,
    );
    assert_eq!(counts(&engine, "room-4"), (1, 1));
    assert_eq!(counts(&engine, "datacenter-6"), (1, 1));
    assert_eq!(counts(&engine, "datacenter-3"), (0, 0));
}
