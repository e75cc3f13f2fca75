//! Small shared helpers used across the rest of the crate.

pub mod ids;

pub use ids::CorrelationId;
