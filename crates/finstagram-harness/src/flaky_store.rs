//! Fault-injecting store wrapper.
//!
//! Delegates to an inner [`KeyValueStore`] but fails operations at a
//! configured rate, so tests can check that persistence failures never break
//! the in-memory session.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use finstagram_store::{KeyValueStore, StoreError};

/// Linear congruential generator; reproducible for a given seed.
#[derive(Debug)]
struct Lcg {
    state: u64,
}

impl Lcg {
    /// Next value in [0.0, 1.0).
    fn next(&mut self) -> f64 {
        // Numerical Recipes constants
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1 << 32;

        self.state = A.wrapping_mul(self.state).wrapping_add(C) % M;
        self.state as f64 / M as f64
    }
}

/// Store that fails each operation with probability `failure_rate`.
///
/// Clones share the inner store, the RNG and the counters.
#[derive(Debug, Clone)]
pub struct FlakyStore<S> {
    inner: S,
    failure_rate: f64,
    rng: Arc<Mutex<Lcg>>,
    operations: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl<S: KeyValueStore> FlakyStore<S> {
    /// Wrap `inner` with the default seed. `failure_rate` is clamped to
    /// [0.0, 1.0].
    pub fn new(inner: S, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Wrap `inner` with an explicit seed.
    pub fn with_seed(inner: S, failure_rate: f64, seed: u64) -> Self {
        Self {
            inner,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: Arc::new(Mutex::new(Lcg { state: seed })),
            operations: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Store that rejects every operation.
    pub fn broken(inner: S) -> Self {
        Self::new(inner, 1.0)
    }

    /// Wrapped store, for checking what actually got persisted.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Operations attempted.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Operations that were failed on purpose.
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    fn roll(&self, op: &str, key: &str) -> Result<(), StoreError> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        let roll = self.rng.lock().unwrap_or_else(PoisonError::into_inner).next();
        if roll < self.failure_rate {
            self.failures.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(op, key, "injected store failure");
            return Err(StoreError::Io(format!("injected failure on {op} {key}")));
        }
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for FlakyStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.roll("get", key)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.roll("set", key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.roll("remove", key)?;
        self.inner.remove(key)
    }
}
