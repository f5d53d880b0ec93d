//! Wire types for the Finstagram REST backend.
//!
//! Every request and response body the client exchanges with the backend is
//! defined here as a plain serde struct, together with the [`Endpoint`] table
//! that maps each operation to its HTTP method and path.
//!
//! The backend is loosely typed: optional fields may be missing or `null`, and
//! timestamps arrive either as formatted strings or as numbers. Decoding is
//! therefore lenient; every optional field defaults instead of failing the
//! whole response.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod chat;
pub mod content;
mod endpoint;
mod time;

pub use auth::{Credentials, LoginReply, ProfileDraft, ServerMessage};
pub use chat::{ChatPeer, OutgoingMessage, WireMessage};
pub use content::{MediaEntry, NotificationEntry, ProfilePost, ProfileView};
pub use endpoint::{Endpoint, Method};
