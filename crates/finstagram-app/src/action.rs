//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use finstagram_proto::{Credentials, OutgoingMessage, ProfileDraft};

use crate::{ContentKind, PollToken, SendId};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Submit credentials.
    Login(Credentials),

    /// Create an account.
    Signup(Credentials),

    /// Save the first profile.
    CreateProfile(ProfileDraft),

    /// Fetch the conversation list.
    FetchChatList {
        /// Logged-in user.
        user: String,
        /// Id echoed in [`crate::AppEvent::ChatListLoaded`].
        request: u64,
    },

    /// Fetch one conversation's history.
    FetchMessages {
        /// Logged-in user.
        user: String,
        /// Other participant.
        peer: String,
        /// Poll session, echoed in [`crate::AppEvent::MessagesLoaded`].
        token: PollToken,
    },

    /// Deliver a message.
    SendMessage {
        /// Local send id, echoed in [`crate::AppEvent::MessageSent`].
        send_id: SendId,
        /// Request body.
        message: OutgoingMessage,
    },

    /// Fetch a content collection.
    FetchContent {
        /// Collection.
        kind: ContentKind,
        /// Logged-in user.
        user: String,
    },
}

impl AppAction {
    /// True for actions that issue a backend request.
    pub fn is_request(&self) -> bool {
        !matches!(self, Self::Render | Self::Quit)
    }
}
