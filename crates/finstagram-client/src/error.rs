//! Error types for backend requests.
//!
//! Distinguishes a backend that answered "no" ([`ApiError::Rejected`]) from one
//! that could not be reached or answered garbage. The application surfaces the
//! former with the server's own message and the latter with a generic one.

use thiserror::Error;

/// Errors from a single backend request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Base URL could not be parsed or cannot carry a path.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Connection failed, timed out or was reset.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status.
    #[error("rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, if present.
        message: Option<String>,
    },

    /// Success status but the body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// True if the backend itself refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// True if the backend could not be reached or its answer was unusable.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }

    /// Server-provided message for a rejection, else `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Rejected { message: Some(message), .. } if !message.is_empty() => message,
            _ => fallback,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
