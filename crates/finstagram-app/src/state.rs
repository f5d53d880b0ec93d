//! View-model types rendered by drivers.

use finstagram_proto::{ChatPeer, OutgoingMessage, WireMessage};

use crate::SendId;

/// Entry in the conversation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// The other participant.
    pub peer_username: String,
    /// Avatar URL, if the peer has one.
    pub avatar_url: Option<String>,
}

impl From<ChatPeer> for Conversation {
    fn from(peer: ChatPeer) -> Self {
        Self { peer_username: peer.username, avatar_url: peer.avatar }
    }
}

/// Whether a message has been seen in a server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    /// Appended locally on send; not yet part of any fetched history.
    Optimistic,
    /// Came from the backend.
    Confirmed,
}

/// Display timestamp of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTime {
    /// Server-formatted time, absent when the backend omitted it.
    Server(Option<String>),
    /// Local wall clock at send time, Unix milliseconds.
    Local(u64),
}

/// One message in a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author username.
    pub sender: String,
    /// Recipient username.
    pub receiver: String,
    /// Body.
    pub text: String,
    /// When it was sent.
    pub timestamp: MessageTime,
    /// Optimistic or confirmed.
    pub origin: MessageOrigin,
    /// Local send that created an optimistic entry.
    pub send_id: Option<SendId>,
}

impl ChatMessage {
    /// Optimistic entry for an outgoing message.
    pub fn optimistic(message: &OutgoingMessage, send_id: SendId, sent_at_millis: u64) -> Self {
        Self {
            sender: message.sender.clone(),
            receiver: message.receiver.clone(),
            text: message.text.clone(),
            timestamp: MessageTime::Local(sent_at_millis),
            origin: MessageOrigin::Optimistic,
            send_id: Some(send_id),
        }
    }

    /// True if the backend has not reported this message yet.
    pub fn is_optimistic(&self) -> bool {
        self.origin == MessageOrigin::Optimistic
    }
}

impl From<WireMessage> for ChatMessage {
    fn from(message: WireMessage) -> Self {
        Self {
            sender: message.sender,
            receiver: message.receiver,
            text: message.text,
            timestamp: MessageTime::Server(message.timestamp),
            origin: MessageOrigin::Confirmed,
            send_id: None,
        }
    }
}
