//! Application layer for Finstagram
//!
//! Pure state machines and a generic runtime for the client controller,
//! enabling deterministic testing with the same code that runs in production.
//!
//! # Components
//!
//! - [`SessionStore`]: authenticated user, persisted across restarts
//! - [`ViewRouter`]: finite state machine over the top-level [`View`]
//! - [`ToastNotifier`]: single auto-expiring status message
//! - [`ChatList`]: conversation peers for the current user
//! - [`ConversationPoller`]: fixed-interval history fetch for the selected peer
//! - [`MessageComposer`]: draft buffer and optimistic sends into a [`Thread`]
//! - [`App`]: controller owning all of the above
//! - [`Driver`]: Trait for platform-specific input and rendering
//! - [`Runtime`]: Generic orchestration loop executing [`AppAction`]s
//!
//! The state machines never perform I/O and never read the clock themselves;
//! time comes from an [`Environment`] and every timer is a deadline checked on
//! [`AppEvent::Tick`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod chats;
mod composer;
mod content;
mod driver;
mod env;
mod error;
mod event;
mod input;
mod poller;
mod runtime;
mod session;
mod state;
mod thread;
mod toast;
mod view;

pub use action::AppAction;
pub use app::{App, AppConfig};
pub use chats::ChatList;
pub use composer::{MessageComposer, PendingSend, SendId};
pub use content::{Content, ContentCache, ContentKind};
pub use driver::Driver;
pub use env::{Environment, SystemEnv};
pub use error::RouteError;
pub use event::AppEvent;
pub use input::UserInput;
pub use poller::{ConversationPoller, DEFAULT_POLL_INTERVAL, PollRequest, PollToken};
pub use runtime::{DEFAULT_TICK, Runtime, perform};
pub use session::{CURRENT_USER_KEY, LAST_VIEW_KEY, SessionStore};
pub use state::{ChatMessage, Conversation, MessageOrigin, MessageTime};
pub use thread::Thread;
pub use toast::{DEFAULT_TOAST_TTL, Toast, ToastKind, ToastNotifier};
pub use view::{Transition, View, ViewEvent, ViewRouter};
