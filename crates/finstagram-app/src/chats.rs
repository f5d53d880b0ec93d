//! Conversation list for the current user.

use finstagram_client::ApiError;
use finstagram_proto::ChatPeer;

use crate::Conversation;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLoad {
    user: String,
    request: u64,
}

/// Peers the current user has talked to.
///
/// Each [`load`](Self::load) supersedes the previous one. A response is only
/// applied if it answers the latest request for the same user, so a slow
/// reply cannot overwrite a newer list or leak into another user's session.
#[derive(Debug, Clone, Default)]
pub struct ChatList {
    conversations: Vec<Conversation>,
    pending: Option<PendingLoad>,
    next_request: u64,
}

impl ChatList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `user`. Returns the request id to echo back.
    pub fn load(&mut self, user: &str) -> u64 {
        self.next_request += 1;
        let request = self.next_request;
        self.pending = Some(PendingLoad { user: user.to_string(), request });
        tracing::debug!(%user, request, "loading chat list");
        request
    }

    /// Apply a fetch result. Returns true if the list changed.
    ///
    /// Failures are logged and leave the list as it was.
    pub fn complete(
        &mut self,
        user: &str,
        request: u64,
        result: Result<Vec<ChatPeer>, ApiError>,
    ) -> bool {
        let is_current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.request == request && pending.user == user);
        if !is_current {
            tracing::debug!(%user, request, "discarding stale chat list");
            return false;
        }
        self.pending = None;

        match result {
            Ok(peers) => {
                self.conversations = peers.into_iter().map(Conversation::from).collect();
                true
            },
            Err(e) => {
                tracing::warn!(%user, error = %e, "failed to load chat list");
                false
            },
        }
    }

    /// Loaded conversations, in backend order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget everything, including any outstanding fetch.
    pub fn reset(&mut self) {
        self.conversations.clear();
        self.pending = None;
    }
}
