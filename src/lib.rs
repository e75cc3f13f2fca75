//! Per-asset warning/critical alert counter aggregator.
//!
//! Subscribes to asset and alert events from a message bus, maintains a
//! running count of active warning/critical alerts per asset, and
//! propagates those counts up the asset containment tree (rack → row →
//! room → datacenter) as metrics. See `SPEC_FULL.md` for the full
//! component design.
//!
//! # Module Organization
//!
//! - [`domain`]: `Asset`, `Alert`, and the wire event types for each
//! - [`message`] / [`mailbox`]: generic envelope + inbox plumbing shared by
//!   the Control, Stream, and Mailbox inboxes
//! - [`bus`]: the `BusClient` trait plus an in-memory implementation used
//!   by tests
//! - [`state`]: pre/post-hook asset and alert stores
//! - [`counters`]: the per-asset `AlertCount` table and delta recomputation
//! - [`publisher`]: metric publication gating (readiness, container filter)
//! - [`resync`]: the Ready/Resyncing state machine
//! - [`queue`]: bounded-concurrency asset-detail query queue
//! - [`actor`]: the aggregator's event loop
//! - [`config`]: TOML configuration loading
//! - [`error`]: fatal, startup-time error taxonomy

pub mod actor;
pub mod bus;
pub mod config;
pub mod counters;
pub mod domain;
pub mod error;
pub mod mailbox;
pub mod message;
pub mod metrics_sink;
pub mod publisher;
pub mod queue;
pub mod resync;
pub mod state;
pub mod util;

pub use actor::AggregatorActor;
pub use config::Config;
pub use domain::{Alert, AlertState, Asset, AssetEvent, AssetOperation, Severity};
pub use error::AppError;
