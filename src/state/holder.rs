//! Keyed asset/alert maps (`spec.md` §4.1, grounded on the original's
//! `FtyAssetStateHolder`/`FtyAlertStateHolder` pre/post-hook base classes).

use std::collections::HashMap;

use tracing::trace;

use super::{AlertHooks, AssetHooks};
use crate::domain::{Alert, Asset, AssetEvent, AssetOperation};

#[derive(Debug, Default)]
pub struct AssetStore {
    assets: HashMap<String, Asset>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.assets.keys()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn clear(&mut self) {
        self.assets.clear();
    }

    /// Runs the full pre → mutate → post contract for one asset event.
    pub fn process_asset(
        &mut self,
        event: AssetEvent,
        alerts: &AlertStore,
        hooks: &mut impl AssetHooks,
    ) {
        let existing = self.assets.get(&event.name);
        if !hooks.pre(existing, &event) {
            trace!(asset = %event.name, ?event.operation, "asset event dropped by pre-hook");
            return;
        }

        let removed = matches!(event.operation, AssetOperation::Delete | AssetOperation::Retire);
        if removed {
            self.assets.remove(&event.name);
        } else {
            self.assets.insert(event.name.clone(), event.clone().into_asset());
        }

        hooks.post(&event, self, alerts, removed);
    }
}

#[derive(Debug, Default)]
pub struct AlertStore {
    alerts: HashMap<String, Alert>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rule: &str) -> Option<&Alert> {
        self.alerts.get(rule)
    }

    pub fn values(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.values()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    /// Runs the full pre → mutate → post contract for one alert event.
    pub fn process_alert(&mut self, event: Alert, assets: &AssetStore, hooks: &mut impl AlertHooks) {
        let existing = self.alerts.get(&event.rule).cloned();
        if !hooks.pre(existing.as_ref(), &event, assets) {
            return;
        }

        let removed = event.state.is_resolved();
        if removed {
            self.alerts.remove(&event.rule);
        } else {
            self.alerts.insert(event.rule.clone(), event.clone());
        }

        hooks.post(existing.as_ref(), &event, assets, removed);
    }

    /// Synthesizes a `RESOLVED` transition for every alert past its TTL, so
    /// counter deltas are applied the same way an explicit resolve would be.
    pub fn purge_expired_alerts(
        &mut self,
        now_monotonic_secs: i64,
        assets: &AssetStore,
        hooks: &mut impl AlertHooks,
    ) {
        let expired: Vec<Alert> = self
            .alerts
            .values()
            .filter(|alert| alert.is_expired(now_monotonic_secs))
            .cloned()
            .collect();

        for alert in expired {
            self.process_alert(alert.as_resolved(), assets, hooks);
        }
    }
}
