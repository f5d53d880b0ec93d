//! Virtual clock for driving the App without a runtime.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use finstagram_app::Environment;

/// Wall-clock value at virtual time zero: 2023-11-14T22:13:20Z.
const DEFAULT_EPOCH_MILLIS: u64 = 1_700_000_000_000;

/// Manually advanced clock. Clones share the same time.
///
/// `Instant` is the elapsed virtual time since creation.
#[derive(Debug, Clone)]
pub struct SimEnv {
    elapsed_millis: Arc<AtomicU64>,
    epoch_millis: u64,
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl SimEnv {
    /// Clock at virtual time zero.
    pub fn new() -> Self {
        Self::with_epoch(DEFAULT_EPOCH_MILLIS)
    }

    /// Clock whose wall time starts at `epoch_millis`.
    pub fn with_epoch(epoch_millis: u64) -> Self {
        Self { elapsed_millis: Arc::new(AtomicU64::new(0)), epoch_millis }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.elapsed_millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Virtual time since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_millis.load(Ordering::SeqCst))
    }
}

impl Environment for SimEnv {
    type Instant = Duration;

    fn now(&self) -> Self::Instant {
        self.elapsed()
    }

    fn wall_clock_millis(&self) -> u64 {
        self.epoch_millis + self.elapsed_millis.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let env = SimEnv::new();
        let other = env.clone();

        env.advance(Duration::from_millis(1500));

        assert_eq!(other.now(), Duration::from_millis(1500));
        assert_eq!(other.wall_clock_millis(), DEFAULT_EPOCH_MILLIS + 1500);
    }
}
