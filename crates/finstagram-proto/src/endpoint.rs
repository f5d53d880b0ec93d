//! Endpoint table.
//!
//! Paths are expressed as segment lists so the HTTP layer can percent-encode
//! user-supplied parts (usernames) instead of splicing them into a string.

use std::fmt;

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// Every backend operation the client performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `POST /api/login`
    Login,
    /// `POST /api/signup`
    Signup,
    /// `POST /api/create-profile`
    CreateProfile,
    /// `GET /api/posts`
    Posts,
    /// `GET /api/reels`
    Reels,
    /// `GET /profile/{username}`
    Profile {
        /// Profile owner.
        username: &'a str,
    },
    /// `GET /notifications/{username}`
    Notifications {
        /// Recipient.
        username: &'a str,
    },
    /// `GET /api/chat-list/{username}`
    ChatList {
        /// Current user.
        username: &'a str,
    },
    /// `GET /api/messages/{user}/{peer}`
    Messages {
        /// Current user.
        user: &'a str,
        /// Selected peer.
        peer: &'a str,
    },
    /// `POST /api/send-message`
    SendMessage,
}

impl<'a> Endpoint<'a> {
    /// HTTP method for this endpoint.
    pub fn method(&self) -> Method {
        match self {
            Self::Login | Self::Signup | Self::CreateProfile | Self::SendMessage => Method::Post,
            Self::Posts
            | Self::Reels
            | Self::Profile { .. }
            | Self::Notifications { .. }
            | Self::ChatList { .. }
            | Self::Messages { .. } => Method::Get,
        }
    }

    /// Unencoded path segments, in order.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::Login => vec!["api", "login"],
            Self::Signup => vec!["api", "signup"],
            Self::CreateProfile => vec!["api", "create-profile"],
            Self::Posts => vec!["api", "posts"],
            Self::Reels => vec!["api", "reels"],
            Self::Profile { username } => vec!["profile", username],
            Self::Notifications { username } => vec!["notifications", username],
            Self::ChatList { username } => vec!["api", "chat-list", username],
            Self::Messages { user, peer } => vec!["api", "messages", user, peer],
            Self::SendMessage => vec!["api", "send-message"],
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method() {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{method} /{}", self.segments().join("/"))
    }
}
