//! User intents delivered by a driver.

use crate::View;

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Submit the login form.
    SubmitLogin {
        /// Username field.
        username: String,
        /// Password field.
        password: String,
    },
    /// Submit the signup form.
    SubmitSignup {
        /// Username field.
        username: String,
        /// Password field.
        password: String,
    },
    /// Submit the profile setup form.
    SubmitProfile {
        /// Full name field (required).
        full_name: String,
        /// Bio field.
        bio: String,
        /// Location field.
        location: String,
    },
    /// Follow the "sign up" link.
    ShowSignup,
    /// Follow the "log in" link.
    ShowLogin,
    /// Tap a navigation bar entry.
    Navigate(View),
    /// Log out.
    Logout,
    /// Open the conversation with a peer.
    SelectPeer(String),
    /// Close the open conversation.
    Back,
    /// Replace the message draft.
    EditDraft(String),
    /// Send the message draft.
    SendDraft,
    /// Dismiss the toast.
    DismissToast,
    /// Exit the application.
    Quit,
}
