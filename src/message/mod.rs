//! The envelope/payload layer shared by the Control, Stream, and Mailbox
//! inboxes.
//!
//! A payload type implements [`Message`] (mostly just `MESSAGE_TYPE`); the
//! actor never inspects a payload to decide where it goes, since which
//! mailbox a value is sent into already settles that. [`MessageEnvelope`]
//! wraps a payload with a receipt timestamp and an optional TTL so that
//! delivery bookkeeping lives in one generic place instead of being
//! duplicated across `ControlMessage`, `StreamMessage`, and `MailboxReply`.

pub mod envelope;
pub mod traits;

pub use envelope::MessageEnvelope;
pub use traits::Message;
