//! Asset entity and the topology operations that mutate the asset store.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Topology operation carried by an `AssetEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetOperation {
    Create,
    Update,
    Delete,
    Retire,
    Inventory,
}

/// A named node in the hierarchical asset inventory.
///
/// Identified by `name`. `parent` is a name looked up through the asset
/// store, not a pointer, a dangling or absent parent simply terminates
/// ancestor walks (no cycle detection needed beyond that).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub parent: Option<String>,
    /// The operation that produced this snapshot, retained only so a later
    /// `UPDATE` can tell whether the topology actually changed.
    pub last_operation: AssetOperation,
}

/// Wire event for an asset topology change, as received on the `ASSETS`
/// stream or synthesized from a resync `ASSET_DETAIL` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEvent {
    pub operation: AssetOperation,
    pub name: String,
    pub parent: Option<String>,
}

impl AssetEvent {
    pub fn into_asset(self) -> Asset {
        Asset {
            name: self.name,
            parent: self.parent,
            last_operation: self.operation,
        }
    }
}

/// `true` iff `name` begins with one of the four container-class prefixes.
/// Only container assets are subject to metric publication.
pub fn is_container_asset(name: &str) -> bool {
    const PREFIXES: [&str; 4] = ["datacenter-", "room-", "row-", "rack-"];
    PREFIXES.iter().any(|p| name.starts_with(p))
}
