//! Alert entity and the wire event that carries it across the bus.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Lifecycle state of an alert rule instance.
///
/// Only `Active` and `Resolved` have special meaning to the counter engine;
/// the `Ack*` variants are all equally "not active" for counting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertState {
    Active,
    AckWip,
    AckIgnore,
    AckPause,
    AckSilence,
    Resolved,
}

impl AlertState {
    /// `true` iff this state compares case-sensitively equal to `ACTIVE`.
    pub fn is_active(self) -> bool {
        matches!(self, AlertState::Active)
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, AlertState::Resolved)
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertState::Active => "ACTIVE",
            AlertState::AckWip => "ACK-WIP",
            AlertState::AckIgnore => "ACK-IGNORE",
            AlertState::AckPause => "ACK-PAUSE",
            AlertState::AckSilence => "ACK-SILENCE",
            AlertState::Resolved => "RESOLVED",
        };
        f.write_str(s)
    }
}

/// Severity carried by an alert. Only `Critical` and `Warning` contribute to
/// the counter tallies; everything else (`Ok`, and any future literal) is
/// opaque and contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Ok,
    Other(String),
}

impl Severity {
    /// `(delta_warning, delta_critical)` contribution of one unit of this
    /// severity, per `spec.md` §4.2's `contrib()` table.
    pub fn contribution(&self) -> (i64, i64) {
        match self {
            Severity::Critical => (0, 1),
            Severity::Warning => (1, 0),
            Severity::Ok | Severity::Other(_) => (0, 0),
        }
    }
}

/// An alert rule instance attached to an asset.
///
/// Identified by `rule`. Retained in the alert store with either `Active`
/// semantics or having been counted as inactive, a `Resolved` alert is
/// never itself stored (invariant I2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub rule: String,
    pub asset: String,
    pub state: AlertState,
    pub severity: Severity,
    /// Wall-clock seconds the alert was last seen, for TTL expiry.
    pub time: i64,
    /// Seconds after `time` at which the alert is considered expired.
    pub ttl: i64,
}

impl Alert {
    pub fn is_expired(&self, now_monotonic_secs: i64) -> bool {
        self.time + self.ttl < now_monotonic_secs
    }

    /// A copy of this alert with `state` forced to `Resolved`, as synthesized
    /// by `purge_expired_alerts` so that the removal still flows through the
    /// normal delta computation.
    pub fn as_resolved(&self) -> Alert {
        Alert {
            state: AlertState::Resolved,
            ..self.clone()
        }
    }
}
