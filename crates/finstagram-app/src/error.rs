//! Error types for the application layer.

use thiserror::Error;

use crate::{View, ViewEvent};

/// Errors from view navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The event is not legal in the current view or session state.
    #[error("cannot apply {event:?} in view {from}")]
    Rejected {
        /// View the router was in.
        from: View,
        /// Event that was refused.
        event: ViewEvent,
    },

    /// Name does not match any view.
    #[error("unknown view: {0}")]
    UnknownView(String),
}
