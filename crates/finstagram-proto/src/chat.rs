//! Direct messaging payloads.

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/chat-list/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPeer {
    /// Peer account name.
    pub username: String,
    /// Profile picture URL, if the peer has one.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One entry of `GET /api/messages/{user}/{peer}`, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    /// Author.
    pub sender: String,
    /// Recipient.
    pub receiver: String,
    /// Message body.
    pub text: String,
    /// Server timestamp as an opaque display string.
    #[serde(default, deserialize_with = "crate::time::lenient")]
    pub timestamp: Option<String>,
}

/// Body of `POST /api/send-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Author (the logged-in user).
    pub sender: String,
    /// Recipient (the selected peer).
    pub receiver: String,
    /// Trimmed message body.
    pub text: String,
}
