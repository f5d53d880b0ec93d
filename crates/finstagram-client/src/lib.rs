//! Client
//!
//! Typed access to the Finstagram REST backend.
//!
//! # Architecture
//!
//! The [`Api`] trait has one async method per backend operation. The
//! application runtime is generic over it, so production uses [`HttpApi`]
//! while tests substitute a scripted in-memory backend. Implementations
//! perform exactly one request per call and never retry; retries (the next
//! poll tick) are the caller's concern.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod http;

use std::future::Future;

pub use error::ApiError;
use finstagram_proto::{
    ChatPeer, Credentials, LoginReply, MediaEntry, NotificationEntry, OutgoingMessage,
    ProfileDraft, ProfileView, ServerMessage, WireMessage,
};
pub use http::HttpApi;

/// Backend operations consumed by the client.
///
/// Clone + Send + Sync + 'static so the runtime can move a handle into each
/// spawned request task.
pub trait Api: Clone + Send + Sync + 'static {
    /// `POST /api/login`
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginReply, ApiError>> + Send;

    /// `POST /api/signup`
    fn signup(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<ServerMessage, ApiError>> + Send;

    /// `POST /api/create-profile`
    fn create_profile(
        &self,
        profile: &ProfileDraft,
    ) -> impl Future<Output = Result<ServerMessage, ApiError>> + Send;

    /// `GET /api/chat-list/{username}`
    fn chat_list(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<ChatPeer>, ApiError>> + Send;

    /// `GET /api/messages/{user}/{peer}`, oldest first.
    fn messages(
        &self,
        user: &str,
        peer: &str,
    ) -> impl Future<Output = Result<Vec<WireMessage>, ApiError>> + Send;

    /// `POST /api/send-message`
    ///
    /// Success means the backend accepted the message; the body is ignored.
    fn send_message(
        &self,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /api/posts`
    fn posts(&self) -> impl Future<Output = Result<Vec<MediaEntry>, ApiError>> + Send;

    /// `GET /api/reels`
    fn reels(&self) -> impl Future<Output = Result<Vec<MediaEntry>, ApiError>> + Send;

    /// `GET /notifications/{username}`
    fn notifications(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<NotificationEntry>, ApiError>> + Send;

    /// `GET /profile/{username}`
    fn profile(&self, username: &str)
    -> impl Future<Output = Result<ProfileView, ApiError>> + Send;
}
