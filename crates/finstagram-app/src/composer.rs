//! Draft buffer and optimistic sends.
//!
//! A send appends an optimistic [`ChatMessage`] to the open [`Thread`] at once
//! and hands back a [`PendingSend`] for the runtime to deliver. The draft is
//! kept until the backend answers: success clears it (unless the user has
//! typed something else meanwhile), failure removes the optimistic entry and
//! leaves the draft for another attempt.

use std::collections::HashMap;

use finstagram_client::ApiError;
use finstagram_proto::OutgoingMessage;

use crate::{ChatMessage, Thread};

/// Identifies one local send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SendId(u64);

impl SendId {
    /// Wrap a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A message handed to the runtime for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// Local send id, echoed back on completion.
    pub id: SendId,
    /// Request body.
    pub message: OutgoingMessage,
}

/// Text input for the open conversation.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    draft: String,
    next_id: u64,
    in_flight: HashMap<SendId, OutgoingMessage>,
}

impl MessageComposer {
    /// Empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Send the draft as `sender` to the thread's peer.
    ///
    /// Returns `None` without touching anything if the draft is blank.
    pub fn send(
        &mut self,
        sender: &str,
        thread: &mut Thread,
        sent_at_millis: u64,
    ) -> Option<PendingSend> {
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }

        let message = OutgoingMessage {
            sender: sender.to_string(),
            receiver: thread.peer().to_string(),
            text: text.to_string(),
        };
        self.next_id += 1;
        let id = SendId(self.next_id);

        thread.push_optimistic(ChatMessage::optimistic(&message, id, sent_at_millis));
        self.in_flight.insert(id, message.clone());
        tracing::debug!(send_id = id.0, receiver = %message.receiver, "message queued");

        Some(PendingSend { id, message })
    }

    /// Apply the backend's answer for `id`. Returns true if anything visible
    /// changed.
    ///
    /// `thread` is the currently open thread; an optimistic entry is only
    /// rolled back if that thread is still the message's conversation.
    pub fn complete(
        &mut self,
        id: SendId,
        result: Result<(), ApiError>,
        thread: Option<&mut Thread>,
    ) -> bool {
        let Some(message) = self.in_flight.remove(&id) else {
            tracing::debug!(send_id = id.0, "ignoring completion for unknown send");
            return false;
        };

        match result {
            Ok(()) => {
                tracing::debug!(send_id = id.0, "message delivered");
                if self.draft.trim() == message.text {
                    self.draft.clear();
                    true
                } else {
                    false
                }
            },
            Err(e) => {
                tracing::warn!(
                    send_id = id.0,
                    receiver = %message.receiver,
                    error = %e,
                    "failed to send message"
                );
                match thread {
                    Some(thread) if thread.peer() == message.receiver => {
                        thread.remove_pending(id)
                    },
                    _ => false,
                }
            },
        }
    }

    /// Sends awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Clear the draft and forget outstanding sends.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.in_flight.clear();
    }
}
