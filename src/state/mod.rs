//! Asset and alert stores with a pre/post hook extension point.
//!
//! The stores own the keyed maps described in `spec.md` §3/§4.1; the hook
//! traits are the seam the counter engine plugs into, supplied to the
//! store, not implemented by subclassing it.

pub mod holder;

pub use holder::{AlertStore, AssetStore};

use crate::domain::{Alert, Asset, AssetEvent};

/// Gate and notify for asset store mutations. `pre` decides whether the
/// event is applied at all; `post` observes the store *after* mutation.
pub trait AssetHooks {
    fn pre(&mut self, existing: Option<&Asset>, event: &AssetEvent) -> bool;
    fn post(&mut self, event: &AssetEvent, assets: &AssetStore, alerts: &AlertStore, removed: bool);
}

/// Gate and notify for alert store mutations. Unlike `AssetHooks::pre`,
/// the counter engine's implementation always accepts (§4.2 describes no
/// rejection criteria for alert events at the holder level).
///
/// `post` receives `prev` (the value the store held before this mutation,
/// if any) alongside `new`, since the counter delta depends on both.
pub trait AlertHooks {
    fn pre(&mut self, existing: Option<&Alert>, new: &Alert, assets: &AssetStore) -> bool;
    fn post(&mut self, prev: Option<&Alert>, new: &Alert, assets: &AssetStore, removed: bool);
}
