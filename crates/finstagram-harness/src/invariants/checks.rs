//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use finstagram_app::View;

use super::{AppSnapshot, Invariant, InvariantResult};

/// Auth forms and the session agree.
///
/// Without a session only `login` and `signup` are reachable; `profileSetup`
/// and every authenticated view require one.
pub struct SessionMatchesView;

impl Invariant for SessionMatchesView {
    fn name(&self) -> &'static str {
        "SessionMatchesView"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let needs_session = state.view.is_authenticated() || state.view == View::ProfileSetup;
        if needs_session && state.username.is_none() {
            return Err(self.violation(format!("view {} shown without a session", state.view)));
        }
        if !needs_session && state.username.is_some() {
            return Err(self.violation(format!(
                "view {} shown while logged in as {:?}",
                state.view, state.username
            )));
        }
        Ok(())
    }
}

/// The store mirrors the in-memory session.
///
/// Holds only when every store write succeeds.
pub struct PersistedSessionMatches;

impl Invariant for PersistedSessionMatches {
    fn name(&self) -> &'static str {
        "PersistedSessionMatches"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if let Some(persisted) = &state.persisted_user {
            if persisted != &state.username {
                return Err(self.violation(format!(
                    "store holds user {persisted:?}, session is {:?}",
                    state.username
                )));
            }
        }

        if let Some(Some(view)) = &state.persisted_view {
            let restorable = view.parse::<View>().is_ok_and(View::is_authenticated);
            if state.username.is_none() || !restorable {
                return Err(self.violation(format!(
                    "store holds view {view:?} for session {:?}",
                    state.username
                )));
            }
        }
        Ok(())
    }
}

/// At most one poll session exists, it targets the open thread, and only
/// while the messages view is active.
pub struct PollingMatchesThread;

impl Invariant for PollingMatchesThread {
    fn name(&self) -> &'static str {
        "PollingMatchesThread"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if state.polled_peer != state.thread_peer {
            return Err(self.violation(format!(
                "polling {:?} but thread is {:?}",
                state.polled_peer, state.thread_peer
            )));
        }
        if state.polled_peer.is_some() && state.view != View::Messages {
            return Err(self.violation(format!(
                "still polling {:?} in view {}",
                state.polled_peer, state.view
            )));
        }
        Ok(())
    }
}

/// Optimistic entries are sends from the current user to the open peer.
pub struct OptimisticMessagesAreOwn;

impl Invariant for OptimisticMessagesAreOwn {
    fn name(&self) -> &'static str {
        "OptimisticMessagesAreOwn"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        for message in state.messages.iter().filter(|m| m.optimistic) {
            let own = state.username.as_deref() == Some(message.sender.as_str());
            let to_peer = state.thread_peer.as_deref() == Some(message.receiver.as_str());
            if !own || !to_peer || message.text.trim().is_empty() {
                return Err(self.violation(format!(
                    "optimistic {:?} -> {:?} ({:?}) in thread {:?} of {:?}",
                    message.sender,
                    message.receiver,
                    message.text,
                    state.thread_peer,
                    state.username
                )));
            }
        }
        Ok(())
    }
}
