//! Message history of the selected conversation.

use finstagram_proto::WireMessage;

use crate::{ChatMessage, SendId};

/// Messages exchanged with one peer, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    peer: String,
    messages: Vec<ChatMessage>,
}

impl Thread {
    /// Empty thread with `peer`.
    pub fn new(peer: impl Into<String>) -> Self {
        Self { peer: peer.into(), messages: Vec::new() }
    }

    /// The other participant.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Replace the whole history with a fetched one.
    ///
    /// Optimistic entries are dropped as well; a message the backend has
    /// stored shows up again in this or a later fetch.
    pub fn replace_confirmed(&mut self, history: Vec<WireMessage>) {
        self.messages = history.into_iter().map(ChatMessage::from).collect();
    }

    /// Append a locally sent message.
    pub fn push_optimistic(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Remove the optimistic entry created by `send_id`, if still present.
    pub fn remove_pending(&mut self, send_id: SendId) -> bool {
        let before = self.messages.len();
        self.messages
            .retain(|message| !(message.is_optimistic() && message.send_id == Some(send_id)));
        self.messages.len() != before
    }

    /// Number of optimistic entries.
    pub fn optimistic_count(&self) -> usize {
        self.messages.iter().filter(|message| message.is_optimistic()).count()
    }
}

#[cfg(test)]
mod tests {
    use finstagram_proto::OutgoingMessage;

    use super::*;
    use crate::{MessageOrigin, MessageTime};

    fn wire(sender: &str, receiver: &str, text: &str) -> WireMessage {
        WireMessage {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            text: text.to_string(),
            timestamp: Some("10:00".to_string()),
        }
    }

    #[test]
    fn replace_drops_optimistic_entries() {
        let mut thread = Thread::new("bob");
        let outgoing = OutgoingMessage {
            sender: "abc".to_string(),
            receiver: "bob".to_string(),
            text: "yo".to_string(),
        };
        thread.push_optimistic(ChatMessage::optimistic(&outgoing, SendId::new(1), 42));
        assert_eq!(thread.optimistic_count(), 1);

        thread.replace_confirmed(vec![wire("bob", "abc", "hey")]);

        assert_eq!(thread.messages().len(), 1);
        let message = &thread.messages()[0];
        assert_eq!(message.origin, MessageOrigin::Confirmed);
        assert_eq!(message.timestamp, MessageTime::Server(Some("10:00".to_string())));
    }

    #[test]
    fn remove_pending_ignores_confirmed_messages() {
        let mut thread = Thread::new("bob");
        thread.replace_confirmed(vec![wire("abc", "bob", "yo")]);

        assert!(!thread.remove_pending(SendId::new(1)));
        assert_eq!(thread.messages().len(), 1);
    }
}
