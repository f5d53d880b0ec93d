//! Observable App state for invariant checks.

use finstagram_app::{
    App, CURRENT_USER_KEY, Environment, LAST_VIEW_KEY, MessageOrigin, ToastKind, View,
};
use finstagram_store::KeyValueStore;

/// One message as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSnapshot {
    /// Author.
    pub sender: String,
    /// Recipient.
    pub receiver: String,
    /// Body.
    pub text: String,
    /// Not yet seen in a fetched history.
    pub optimistic: bool,
}

/// Everything a user (or the store) could observe at one moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Active view.
    pub view: View,
    /// In-memory session.
    pub username: Option<String>,
    /// Persisted `currentUser`; `None` when the store could not be read.
    pub persisted_user: Option<Option<String>>,
    /// Persisted `lastView`; `None` when the store could not be read.
    pub persisted_view: Option<Option<String>>,
    /// Peer with a live poll session.
    pub polled_peer: Option<String>,
    /// Peer of the open thread.
    pub thread_peer: Option<String>,
    /// Open thread's messages.
    pub messages: Vec<MessageSnapshot>,
    /// Message draft.
    pub draft: String,
    /// Visible toast.
    pub toast: Option<(String, ToastKind)>,
    /// Conversation peers.
    pub conversations: Vec<String>,
}

impl AppSnapshot {
    /// Capture `app`.
    pub fn from_app<E: Environment, S: KeyValueStore>(app: &App<E, S>) -> Self {
        let store = app.session().store();
        let thread = app.thread();

        Self {
            view: app.current_view(),
            username: app.username().map(str::to_owned),
            persisted_user: store.get(CURRENT_USER_KEY).ok(),
            persisted_view: store.get(LAST_VIEW_KEY).ok(),
            polled_peer: app.poller().active_peer().map(str::to_owned),
            thread_peer: thread.map(|t| t.peer().to_owned()),
            messages: thread
                .map(|t| {
                    t.messages()
                        .iter()
                        .map(|m| MessageSnapshot {
                            sender: m.sender.clone(),
                            receiver: m.receiver.clone(),
                            text: m.text.clone(),
                            optimistic: m.origin == MessageOrigin::Optimistic,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            draft: app.draft().to_owned(),
            toast: app.toast().map(|toast| (toast.text.clone(), toast.kind)),
            conversations: app.conversations().iter().map(|c| c.peer_username.clone()).collect(),
        }
    }

    /// Texts of the open thread, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    /// Visible toast text.
    pub fn toast_text(&self) -> Option<&str> {
        self.toast.as_ref().map(|(text, _)| text.as_str())
    }
}
