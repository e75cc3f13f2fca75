//! Core message trait shared by the three inbox payload types.

// Layer 1: Standard library imports
use std::fmt::Debug;

/// A payload that can travel through one of the actor's mailboxes.
///
/// Compile-time `MESSAGE_TYPE` avoids any runtime type tagging; routing
/// between the Control, Stream, and Mailbox inboxes is done by which
/// mailbox a value is sent into, not by inspecting the payload.
pub trait Message: Send + Sync + Clone + Debug + 'static {
    const MESSAGE_TYPE: &'static str;
}
