//! Fixed-interval history polling for the selected conversation.
//!
//! At most one poll session exists. Selecting a peer starts a session with an
//! immediate fetch; afterwards [`ConversationPoller::tick`] issues a fetch each
//! time another interval has elapsed. Sessions carry a [`PollToken`] so the
//! caller can recognise responses that belong to a session that has since
//! been cancelled.

use std::{fmt, ops::Sub, time::Duration};

use crate::env::elapsed;

/// Delay between successive history fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Generation number of a poll session. Never reused within a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PollToken(u64);

impl fmt::Display for PollToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poll#{}", self.0)
    }
}

/// A history fetch the caller should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    /// Peer whose history to fetch.
    pub peer: String,
    /// Session the fetch belongs to.
    pub token: PollToken,
}

#[derive(Debug, Clone)]
struct PollSession<I> {
    peer: String,
    token: PollToken,
    started_at: I,
    /// Index of the next interval boundary that triggers a fetch.
    next_period: u128,
}

/// Drives fetches for at most one conversation.
#[derive(Debug, Clone)]
pub struct ConversationPoller<I> {
    session: Option<PollSession<I>>,
    interval: Duration,
    generation: u64,
}

impl<I> ConversationPoller<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Poller fetching every `interval` (at least one millisecond).
    pub fn new(interval: Duration) -> Self {
        Self { session: None, interval: interval.max(Duration::from_millis(1)), generation: 0 }
    }

    /// Make `peer` the polled conversation.
    ///
    /// Ends any existing session first. Returns the immediate fetch, or
    /// `None` if `peer` is already being polled.
    pub fn select(&mut self, peer: &str, now: I) -> Option<PollRequest> {
        if self.session.as_ref().is_some_and(|session| session.peer == peer) {
            return None;
        }
        self.stop();

        self.generation += 1;
        let token = PollToken(self.generation);
        tracing::debug!(%peer, %token, "poll started");
        self.session =
            Some(PollSession { peer: peer.to_string(), token, started_at: now, next_period: 1 });
        Some(PollRequest { peer: peer.to_string(), token })
    }

    /// Cancel the session identified by `token`. This is the only way to
    /// stop polling from outside. Returns false (and keeps polling) if
    /// `token` is not the active session.
    pub fn cancel(&mut self, token: PollToken) -> bool {
        if self.active_token() == Some(token) {
            self.stop();
            true
        } else {
            tracing::debug!(%token, "ignoring cancel for stale poll");
            false
        }
    }

    fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(peer = %session.peer, token = %session.token, "poll cancelled");
        }
    }

    /// Fetch due at `now`, if any.
    ///
    /// Fetches are aligned to multiples of the interval from session start.
    /// If several boundaries passed since the last tick only one fetch is
    /// issued.
    pub fn tick(&mut self, now: I) -> Option<PollRequest> {
        let interval = self.interval.as_nanos();
        let session = self.session.as_mut()?;

        let period = elapsed(session.started_at, now).as_nanos() / interval;
        if period < session.next_period {
            return None;
        }
        session.next_period = period + 1;
        Some(PollRequest { peer: session.peer.clone(), token: session.token })
    }

    /// True if a response for (`peer`, `token`) belongs to the live session.
    pub fn accepts(&self, peer: &str, token: PollToken) -> bool {
        self.session.as_ref().is_some_and(|session| session.token == token && session.peer == peer)
    }

    /// Peer being polled.
    pub fn active_peer(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.peer.as_str())
    }

    /// Token of the live session.
    pub fn active_token(&self) -> Option<PollToken> {
        self.session.as_ref().map(|session| session.token)
    }

    /// True while a session exists.
    pub fn is_polling(&self) -> bool {
        self.session.is_some()
    }
}
