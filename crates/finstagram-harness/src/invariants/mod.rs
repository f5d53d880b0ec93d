//! Properties of the client that hold after every event.
//!
//! The harness renders an [`AppSnapshot`] of the controller (view, session,
//! persisted keys, poll session, open thread) and hands it to each registered
//! [`Invariant`]. Scripted runs check on every frame; property tests check
//! after every generated step.
//!
//! ```ignore
//! let registry = InvariantRegistry::with_reliable_store();
//! registry.assert_all(&AppSnapshot::from_app(&app), "after login");
//! ```

mod checks;
mod snapshot;

pub use checks::{
    OptimisticMessagesAreOwn, PersistedSessionMatches, PollingMatchesThread, SessionMatchesView,
};
pub use snapshot::{AppSnapshot, MessageSnapshot};

/// Outcome of one invariant on one snapshot.
pub type InvariantResult = Result<(), Violation>;

/// A broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Which invariant.
    pub invariant: &'static str,
    /// What the snapshot showed.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property of an [`AppSnapshot`].
pub trait Invariant: Send + Sync {
    /// Name used in violations.
    fn name(&self) -> &'static str;

    /// `Err` when `state` breaks the property.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;

    /// Build a violation tagged with [`name`](Self::name).
    fn violation(&self, message: String) -> Violation {
        Violation { invariant: self.name(), message }
    }
}

/// Set of invariants checked together.
#[derive(Default)]
pub struct InvariantRegistry {
    checks: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// No checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that hold even when the store drops writes: session and view
    /// agree, polling follows the open thread, optimistic entries are the
    /// user's own sends.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SessionMatchesView);
        registry.add(PollingMatchesThread);
        registry.add(OptimisticMessagesAreOwn);
        registry
    }

    /// [`standard`](Self::standard) plus [`PersistedSessionMatches`]. Only
    /// valid when every store write succeeds.
    pub fn with_reliable_store() -> Self {
        let mut registry = Self::standard();
        registry.add(PersistedSessionMatches);
        registry
    }

    /// Register `invariant`.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.checks.push(Box::new(invariant));
    }

    /// Run every check. Returns all violations, not just the first.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for check in &self.checks {
            if let Err(violation) = check.check(state) {
                violations.push(violation);
            }
        }
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Panic listing every violation, prefixed with `context`.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        let Err(violations) = self.check_all(state) else {
            return;
        };
        let mut report = format!("{} invariant(s) broken {context}", violations.len());
        for violation in &violations {
            report.push_str("\n  ");
            report.push_str(&violation.to_string());
        }
        panic!("{report}");
    }

    /// Registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
