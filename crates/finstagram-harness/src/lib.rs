//! Deterministic simulation harness for Finstagram client testing.
//!
//! In-memory implementations of the Environment, Api, KeyValueStore and
//! Driver seams so the production [`finstagram_app::Runtime`] and
//! [`finstagram_app::App`] run unchanged under test.
//!
//! - [`SimEnv`]: hand-advanced virtual clock for driving [`App`] directly
//! - [`FakeBackend`]: scripted backend with a call log, latency and failure
//!   injection
//! - [`FlakyStore`]: store wrapper that fails operations at a seeded rate
//! - [`SimDriver`]: scripted input with virtual pauses; records every render
//!
//! # Invariant Testing
//!
//! The `invariants` module verifies properties that must hold after every
//! event. Use [`InvariantRegistry::standard()`] for the common set.
//!
//! [`App`]: finstagram_app::App

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fake_backend;
pub mod flaky_store;
pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use fake_backend::{Call, CallRecord, FakeBackend, Route};
pub use flaky_store::FlakyStore;
pub use invariants::{
    AppSnapshot, Invariant, InvariantRegistry, InvariantResult, MessageSnapshot,
    OptimisticMessagesAreOwn, PersistedSessionMatches, PollingMatchesThread, SessionMatchesView,
    Violation,
};
pub use sim_driver::{RenderLog, SimDriver, Step};
pub use sim_env::SimEnv;
