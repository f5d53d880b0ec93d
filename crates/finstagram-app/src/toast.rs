//! Single auto-expiring status message.

use std::{ops::Sub, time::Duration};

use crate::env::elapsed;

/// How long a toast stays visible unless replaced or dismissed.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(3000);

/// Toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation succeeded.
    Success,
    /// Operation failed or input was invalid.
    Error,
}

/// A visible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast<I> {
    /// Message text.
    pub text: String,
    /// Styling.
    pub kind: ToastKind,
    /// When it was shown. Expiry is measured from here.
    pub created_at: I,
}

/// Holds at most one toast and expires it after a fixed TTL.
///
/// Showing a new toast replaces the old one and restarts the timer, so there
/// is never more than one deadline outstanding.
#[derive(Debug, Clone)]
pub struct ToastNotifier<I> {
    current: Option<Toast<I>>,
    ttl: Duration,
}

impl<I> ToastNotifier<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Notifier whose toasts live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Replace any current toast.
    pub fn show(&mut self, text: impl Into<String>, kind: ToastKind, now: I) {
        let text = text.into();
        tracing::debug!(%text, ?kind, "toast");
        self.current = Some(Toast { text, kind, created_at: now });
    }

    /// Dismiss the current toast.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the toast if its TTL has run out. Returns true if one was dropped.
    pub fn tick(&mut self, now: I) -> bool {
        let expired = self.current.as_ref().is_some_and(|toast| self.is_expired(toast, now));
        if expired {
            self.current = None;
        }
        expired
    }

    /// Toast to display at `now`, hiding one that is due but not yet ticked.
    pub fn visible(&self, now: I) -> Option<&Toast<I>> {
        self.current.as_ref().filter(|toast| !self.is_expired(toast, now))
    }

    /// Stored toast regardless of expiry.
    pub fn current(&self) -> Option<&Toast<I>> {
        self.current.as_ref()
    }

    fn is_expired(&self, toast: &Toast<I>, now: I) -> bool {
        elapsed(toast.created_at, now) >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn toast_expires_after_ttl() {
        let mut toasts = ToastNotifier::new(DEFAULT_TOAST_TTL);
        toasts.show("Logged out successfully", ToastKind::Success, at(0));

        assert!(!toasts.tick(at(2999)));
        let text = toasts.visible(at(2999)).map(|t| t.text.as_str());
        assert_eq!(text, Some("Logged out successfully"));

        assert!(toasts.tick(at(3000)));
        assert!(toasts.current().is_none());
        assert!(!toasts.tick(at(3100)));
    }

    #[test]
    fn replacing_restarts_timer() {
        let mut toasts = ToastNotifier::new(DEFAULT_TOAST_TTL);
        toasts.show("first", ToastKind::Error, at(0));
        toasts.show("second", ToastKind::Success, at(1000));

        assert!(!toasts.tick(at(3001)));
        let toast = toasts.visible(at(3001)).unwrap();
        assert_eq!(toast.text, "second");
        assert_eq!(toast.kind, ToastKind::Success);

        assert!(toasts.tick(at(4000)));
    }

    #[test]
    fn clear_dismisses_early() {
        let mut toasts = ToastNotifier::new(DEFAULT_TOAST_TTL);
        toasts.show("Server offline", ToastKind::Error, at(0));
        toasts.clear();

        assert!(toasts.visible(at(1)).is_none());
        assert!(!toasts.tick(at(5000)));
    }

    #[test]
    fn visible_hides_due_toast_before_tick() {
        let mut toasts = ToastNotifier::new(Duration::from_millis(500));
        toasts.show("hi", ToastKind::Success, at(0));

        assert!(toasts.visible(at(500)).is_none());
        assert!(toasts.current().is_some());
        assert!(toasts.visible(at(499)).is_some());
    }
}
