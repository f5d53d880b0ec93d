//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` feeds a fixed script of inputs and virtual pauses to the
//! production [`finstagram_app::Runtime`] and records an [`AppSnapshot`] on
//! every render. Pauses use tokio's clock, so under a paused test runtime a
//! whole session of polling runs instantly and deterministically.

use std::{
    collections::VecDeque,
    convert::Infallible,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use finstagram_app::{App, Driver, Environment, UserInput};
use finstagram_store::KeyValueStore;
use tokio::time::Instant;

use crate::invariants::{AppSnapshot, InvariantRegistry};

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver an input.
    Input(UserInput),
    /// Let time pass before the next step.
    Wait(Duration),
}

/// Snapshots captured on each render. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    frames: Arc<Mutex<Vec<AppSnapshot>>>,
}

impl RenderLog {
    /// Every frame so far.
    pub fn frames(&self) -> Vec<AppSnapshot> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<AppSnapshot> {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    /// Number of renders.
    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True before the first render.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, frame: AppSnapshot) {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).push(frame);
    }
}

/// Scripted driver for deterministic runtime tests.
///
/// Input ends (and the runtime stops) once the script is exhausted.
pub struct SimDriver {
    script: VecDeque<Step>,
    /// Deadline of the pause in progress, kept across cancelled polls.
    waiting_until: Option<Instant>,
    log: RenderLog,
    invariants: Option<InvariantRegistry>,
    stopped: bool,
}

impl SimDriver {
    /// Driver playing `script`.
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: script.into_iter().collect(),
            waiting_until: None,
            log: RenderLog::default(),
            invariants: None,
            stopped: false,
        }
    }

    /// Check invariants on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Handle on the render log, usable after the runtime consumed the driver.
    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }

    /// True once the runtime has stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Driver for SimDriver {
    type Error = Infallible;

    async fn poll_input(&mut self) -> Result<Option<UserInput>, Self::Error> {
        loop {
            match self.script.front() {
                None => return Ok(None),
                Some(Step::Wait(pause)) => {
                    let pause = *pause;
                    let deadline =
                        *self.waiting_until.get_or_insert_with(|| Instant::now() + pause);
                    tokio::time::sleep_until(deadline).await;
                    self.waiting_until = None;
                    self.script.pop_front();
                },
                Some(Step::Input(_)) => {
                    if let Some(Step::Input(input)) = self.script.pop_front() {
                        return Ok(Some(input));
                    }
                },
            }
        }
    }

    fn render<E: Environment, S: KeyValueStore>(
        &mut self,
        app: &App<E, S>,
    ) -> Result<(), Self::Error> {
        let snapshot = AppSnapshot::from_app(app);
        if let Some(registry) = &self.invariants {
            registry.assert_all(&snapshot, "after render");
        }
        self.log.push(snapshot);
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn waits_then_delivers_input() {
        let mut driver = SimDriver::new([
            Step::Wait(Duration::from_secs(2)),
            Step::Input(UserInput::DismissToast),
        ]);
        let start = Instant::now();

        let input = driver.poll_input().await.unwrap();

        assert_eq!(input, Some(UserInput::DismissToast));
        assert_eq!(start.elapsed(), Duration::from_secs(2));
        assert_eq!(driver.poll_input().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wait_keeps_deadline() {
        let mut driver =
            SimDriver::new([Step::Wait(Duration::from_secs(5)), Step::Input(UserInput::Quit)]);
        let start = Instant::now();

        let cancelled =
            tokio::time::timeout(Duration::from_secs(1), driver.poll_input()).await;
        assert!(cancelled.is_err());

        let input = driver.poll_input().await.unwrap();
        assert_eq!(input, Some(UserInput::Quit));
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }
}
