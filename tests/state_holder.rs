//! Pre/post-hook contract tests for the asset and alert stores, exercised
//! against the real counter engine rather than a recording double.

use fty_alert_stats::counters::CounterEngine;
use fty_alert_stats::domain::{Alert, AlertState, AssetEvent, AssetOperation, Severity};
use fty_alert_stats::state::{AlertStore, AssetStore};

fn asset_event(op: AssetOperation, name: &str, parent: Option<&str>) -> AssetEvent {
    AssetEvent {
        operation: op,
        name: name.to_string(),
        parent: parent.map(str::to_string),
    }
}

fn alert(rule: &str, asset: &str, state: AlertState, severity: Severity) -> Alert {
    Alert {
        rule: rule.to_string(),
        asset: asset.to_string(),
        state,
        severity,
        time: 0,
        ttl: 3600,
    }
}

#[test]
fn retire_drops_the_asset_and_triggers_a_full_recompute() {
    let mut assets = AssetStore::new();
    let mut alerts = AlertStore::new();
    let mut engine = CounterEngine::new();

    assets.process_asset(asset_event(AssetOperation::Create, "room-1", None), &alerts, &mut engine);
    assets.process_asset(
        asset_event(AssetOperation::Create, "rack-1", Some("room-1")),
        &alerts,
        &mut engine,
    );
    alerts.process_alert(
        alert("r1", "rack-1", AlertState::Active, Severity::Critical),
        &assets,
        &mut engine,
    );
    assert_eq!(engine.get("room-1").unwrap().critical, 1);

    assets.process_asset(asset_event(AssetOperation::Retire, "rack-1", None), &alerts, &mut engine);

    assert!(assets.get("rack-1").is_none());
    // The alert is still in the store pointing at a retired asset, but the
    // recompute only walks assets that still exist, so the chain stops.
    assert_eq!(engine.get("room-1").unwrap().critical, 0);
}

#[test]
fn repeated_inventory_events_never_mutate_the_store() {
    let mut assets = AssetStore::new();
    let alerts = AlertStore::new();
    let mut engine = CounterEngine::new();

    for _ in 0..3 {
        assets.process_asset(
            asset_event(AssetOperation::Inventory, "rack-1", Some("room-1")),
            &alerts,
            &mut engine,
        );
    }

    assert!(assets.get("rack-1").is_none());
    assert!(engine.take_pending().is_empty());
}

#[test]
fn ack_states_are_retained_but_contribute_nothing() {
    let assets = AssetStore::new();
    let mut alerts = AlertStore::new();
    let mut engine = CounterEngine::new();

    alerts.process_alert(
        alert("r1", "rack-1", AlertState::AckWip, Severity::Critical),
        &assets,
        &mut engine,
    );

    assert!(alerts.get("r1").is_some());
    assert!(engine.get("rack-1").is_none());
}

#[test]
fn expired_alert_is_synthesized_as_resolved_and_reverses_its_contribution() {
    let mut assets = AssetStore::new();
    let mut alerts = AlertStore::new();
    let mut engine = CounterEngine::new();

    assets.process_asset(asset_event(AssetOperation::Create, "rack-1", None), &alerts, &mut engine);
    let mut active = alert("r1", "rack-1", AlertState::Active, Severity::Warning);
    active.time = 0;
    active.ttl = 10;
    alerts.process_alert(active, &assets, &mut engine);
    assert_eq!(engine.get("rack-1").unwrap().warning, 1);

    alerts.purge_expired_alerts(100, &assets, &mut engine);

    assert!(alerts.get("r1").is_none());
    assert_eq!(engine.get("rack-1").unwrap().warning, 0);
}

#[test]
fn resolving_an_alert_that_was_never_active_is_a_no_op() {
    let assets = AssetStore::new();
    let mut alerts = AlertStore::new();
    let mut engine = CounterEngine::new();

    alerts.process_alert(
        alert("r1", "rack-1", AlertState::AckSilence, Severity::Critical),
        &assets,
        &mut engine,
    );
    alerts.process_alert(
        alert("r1", "rack-1", AlertState::Resolved, Severity::Critical),
        &assets,
        &mut engine,
    );

    assert!(alerts.get("r1").is_none());
    assert!(engine.get("rack-1").is_none());
}
