//! Top-level views and the navigation state machine.
//!
//! Exactly one [`View`] is active at any time. [`ViewRouter`] owns it and only
//! moves it along the legal edges:
//!
//! ```text
//! login ──SignupLinkClicked──> signup ──LoginLinkClicked──> login
//! login ──LoginSucceeded{has_profile}──> feed | profileSetup
//! profileSetup ──ProfileSetupCompleted──> feed
//! <authenticated> ──Navigate(target)──> target
//! <authenticated> ──LogoutRequested──> login
//! ```

use std::{fmt, str::FromStr};

use crate::RouteError;

/// Top-level screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Credentials form.
    Login,
    /// Account creation form.
    Signup,
    /// First-login profile form.
    ProfileSetup,
    /// Image posts from everyone.
    Feed,
    /// Video posts from everyone.
    Reels,
    /// Conversations and the selected thread.
    Messages,
    /// Activity for the current user.
    Notifications,
    /// The current user's profile and posts.
    Profile,
}

impl View {
    /// Views reachable from the navigation bar.
    pub const AUTHENTICATED: [View; 5] =
        [View::Feed, View::Reels, View::Messages, View::Notifications, View::Profile];

    /// True for views that require a session and are worth restoring.
    pub fn is_authenticated(self) -> bool {
        Self::AUTHENTICATED.contains(&self)
    }

    /// Persisted name of the view.
    pub fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::ProfileSetup => "profileSetup",
            Self::Feed => "feed",
            Self::Reels => "reels",
            Self::Messages => "messages",
            Self::Notifications => "notifications",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "signup" => Ok(Self::Signup),
            "profileSetup" => Ok(Self::ProfileSetup),
            "feed" => Ok(Self::Feed),
            "reels" => Ok(Self::Reels),
            "messages" => Ok(Self::Messages),
            "notifications" => Ok(Self::Notifications),
            "profile" => Ok(Self::Profile),
            other => Err(RouteError::UnknownView(other.to_string())),
        }
    }
}

/// Navigation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// "Sign up" link on the login form.
    SignupLinkClicked,
    /// "Log in" link on the signup form.
    LoginLinkClicked,
    /// Backend accepted the credentials.
    LoginSucceeded {
        /// Whether the account already has a profile.
        has_profile: bool,
    },
    /// Backend saved the first profile.
    ProfileSetupCompleted,
    /// Logout button.
    LogoutRequested,
    /// Navigation bar tap.
    Navigate(View),
}

/// A view change that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// View before the event.
    pub from: View,
    /// View after the event.
    pub to: View,
}

impl Transition {
    /// True if the event left the view unchanged.
    pub fn is_noop(self) -> bool {
        self.from == self.to
    }
}

/// Owner of the active view.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    /// Start in `start`.
    pub fn new(start: View) -> Self {
        Self { current: start }
    }

    /// View to show at startup.
    ///
    /// Without a session this is always `login`. With one, the persisted view
    /// is restored if it is an authenticated view, otherwise `feed`.
    pub fn initial(session: Option<&str>, persisted: Option<View>) -> View {
        match session {
            None => View::Login,
            Some(_) => persisted.filter(|view| view.is_authenticated()).unwrap_or(View::Feed),
        }
    }

    /// Active view.
    pub fn current(&self) -> View {
        self.current
    }

    /// Apply `event`. `authenticated` is whether a session is present.
    ///
    /// Navigation and logout are only offered from authenticated views, so
    /// they are refused elsewhere even with a session.
    pub fn transition(
        &mut self,
        event: ViewEvent,
        authenticated: bool,
    ) -> Result<Transition, RouteError> {
        let from = self.current;
        let to = match event {
            ViewEvent::SignupLinkClicked if from == View::Login => View::Signup,
            ViewEvent::LoginLinkClicked if from == View::Signup => View::Login,
            ViewEvent::LoginSucceeded { has_profile } if authenticated => {
                if has_profile { View::Feed } else { View::ProfileSetup }
            },
            ViewEvent::ProfileSetupCompleted if authenticated && from == View::ProfileSetup => {
                View::Feed
            },
            ViewEvent::LogoutRequested
                if authenticated && (from.is_authenticated() || from == View::ProfileSetup) =>
            {
                View::Login
            },
            ViewEvent::Navigate(target)
                if authenticated && from.is_authenticated() && target.is_authenticated() =>
            {
                target
            },
            _ => return Err(RouteError::Rejected { from, event }),
        };

        self.current = to;
        Ok(Transition { from, to })
    }
}
