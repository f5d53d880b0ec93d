//! Events consumed by the [`crate::App`] state machine.
//!
//! Besides user input and the periodic tick, every backend request the runtime
//! performs comes back as exactly one completion event carrying the
//! identifiers the app attached to the request.

use finstagram_client::ApiError;
use finstagram_proto::{ChatPeer, LoginReply, ServerMessage, WireMessage};

use crate::{Content, ContentKind, PollToken, SendId, UserInput};

/// Input to the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic tick for timers and polling.
    Tick,

    /// User intent.
    Input(UserInput),

    /// `login` finished.
    LoginCompleted {
        /// Reply or failure.
        result: Result<LoginReply, ApiError>,
    },

    /// `signup` finished.
    SignupCompleted {
        /// Server message or failure.
        result: Result<ServerMessage, ApiError>,
    },

    /// `create-profile` finished.
    ProfileSaved {
        /// Server message or failure.
        result: Result<ServerMessage, ApiError>,
    },

    /// `chat-list` finished.
    ChatListLoaded {
        /// User the list was fetched for.
        user: String,
        /// Request id from [`crate::AppAction::FetchChatList`].
        request: u64,
        /// Peers or failure.
        result: Result<Vec<ChatPeer>, ApiError>,
    },

    /// `messages` finished.
    MessagesLoaded {
        /// Peer whose history was fetched.
        peer: String,
        /// Poll session the fetch belongs to.
        token: PollToken,
        /// History or failure.
        result: Result<Vec<WireMessage>, ApiError>,
    },

    /// `send-message` finished.
    MessageSent {
        /// Local send id.
        send_id: SendId,
        /// Outcome.
        result: Result<(), ApiError>,
    },

    /// A content fetch finished.
    ContentLoaded {
        /// Collection requested.
        kind: ContentKind,
        /// User the fetch was made for.
        user: String,
        /// Content or failure.
        result: Result<Content, ApiError>,
    },
}
