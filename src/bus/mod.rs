//! Bus collaborator: wire payload types, the `BusClient` trait boundary,
//! and an in-process implementation for tests.

pub mod memory;
pub mod messages;
pub mod traits;

pub use memory::{InMemoryBus, OutboundMailboxSend};
pub use messages::{ControlMessage, MailboxReply, MailboxRequest, StreamMessage};
pub use traits::{BusClient, BusError};
