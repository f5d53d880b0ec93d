//! Time source for the state machines.
//!
//! Decouples application logic from the system clock. Production uses tokio's
//! clock (so paused-time tests drive it too); simulation supplies a virtual
//! clock advanced by hand.

use std::{fmt::Debug, ops::Sub, time::Duration};

/// Abstract environment providing time.
///
/// Implementations MUST guarantee that `now()` never goes backwards.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Monotonic instant.
    ///
    /// Production uses `tokio::time::Instant`; simulation may use any
    /// monotonic value, such as a `Duration` since start.
    type Instant: Copy + Ord + Debug + Send + Sync + Sub<Output = Duration>;

    /// Monotonic now.
    fn now(&self) -> Self::Instant;

    /// Wall-clock time in Unix milliseconds.
    ///
    /// Only used to stamp locally created messages for display.
    fn wall_clock_millis(&self) -> u64;
}

/// Production environment using tokio's clock and the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Environment on tokio's clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn wall_clock_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Time elapsed from `since` to `now`, zero if `now` is not later.
pub(crate) fn elapsed<I>(since: I, now: I) -> Duration
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    if now > since { now - since } else { Duration::ZERO }
}
