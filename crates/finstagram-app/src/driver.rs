//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific
//! frontends. Each frontend implements the trait to supply user input and draw
//! the [`App`], while the generic [`crate::Runtime`] handles all orchestration
//! including backend requests.

use std::future::Future;

use finstagram_store::KeyValueStore;

use crate::{App, Environment, UserInput};

/// Abstracts user-facing I/O for the application runtime.
///
/// # Implementations
///
/// - **CLI**: line-oriented commands on stdin, text rendering on stdout
/// - **Simulation**: scripted inputs with virtual pauses, recorded frames
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next user input.
    ///
    /// Returns `None` when input is exhausted and the application should
    /// stop. Must be cancel-safe: the runtime drops the future whenever
    /// another event arrives first.
    fn poll_input(&mut self) -> impl Future<Output = Result<Option<UserInput>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render<E: Environment, S: KeyValueStore>(
        &mut self,
        app: &App<E, S>,
    ) -> Result<(), Self::Error>;

    /// Release resources before exit.
    fn stop(&mut self);
}
