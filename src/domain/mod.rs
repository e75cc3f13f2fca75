//! Domain entities: assets, alerts, and the topology rules tying them together.

pub mod alert;
pub mod asset;

pub use alert::{Alert, AlertState, Severity};
pub use asset::{is_container_asset, Asset, AssetEvent, AssetOperation};
