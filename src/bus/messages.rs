//! Wire payloads carried on the three inboxes (`spec.md` §2, §6).

use serde::{Deserialize, Serialize};

use crate::domain::{Alert, AssetEvent};
use crate::message::Message;
use crate::util::CorrelationId;

/// Control-inbox payload: `$TERM` and `RESYNC`, posted by the supervisor or
/// the periodic resync timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMessage {
    Term,
    Resync,
}

impl Message for ControlMessage {
    const MESSAGE_TYPE: &'static str = "control";
}

/// Stream-inbox payload: an asset-topology or alert-state event arriving on
/// the `ASSETS`/`ALERTS` streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamMessage {
    Asset(AssetEvent),
    Alert(Alert),
}

impl Message for StreamMessage {
    const MESSAGE_TYPE: &'static str = "stream";
}

/// Messages the actor sends out over the mailbox: peer queries it initiates
/// during resync, and the response it owes a peer that queried `REPUBLISH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxRequest {
    /// To `asset-agent`, subject `ASSETS_IN_CONTAINER`.
    AssetsInContainer,
    /// To `asset-agent`, subject `ASSET_DETAIL`.
    AssetDetail { name: String },
    /// To `fty-alert-list`, subject `rfc-alerts-list`.
    AlertsList,
    /// Reply to an inbound `REPUBLISH` query, tagged with the correlation
    /// id from the request it answers.
    RepublishResponse {
        correlation: CorrelationId,
        ready: bool,
    },
}

impl Message for MailboxRequest {
    const MESSAGE_TYPE: &'static str = "mailbox_request";
}

/// Messages the actor receives on the mailbox inbox: replies to its own
/// outstanding queries, and inbound requests from peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MailboxReply {
    AssetsInContainer { names: Vec<String> },
    AlertsList { alerts: Vec<Alert> },
    AssetDetail { event: AssetEvent },
    /// A peer asking whether this actor is ready to republish, expecting
    /// an `OK`/`RESYNC` `MailboxRequest::RepublishResponse` in reply.
    RepublishQuery { correlation: CorrelationId, from: String },
}

impl Message for MailboxReply {
    const MESSAGE_TYPE: &'static str = "mailbox_reply";
}
