//! Authenticated session, persisted across restarts.
//!
//! Two keys live in the backing store: [`CURRENT_USER_KEY`] holds the
//! username and [`LAST_VIEW_KEY`] the last authenticated view. Both are
//! removed together on logout.

use finstagram_store::{KeyValueStore, StoreError};

use crate::View;

/// Store key holding the logged-in username.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Store key holding the last authenticated view.
pub const LAST_VIEW_KEY: &str = "lastView";

/// Current user plus the store that remembers them.
///
/// The in-memory username is authoritative for the running process; store
/// failures are reported to the caller but never undo the in-memory change.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
    username: Option<String>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Restore the session from `store`.
    ///
    /// An unreadable or empty entry counts as logged out.
    pub fn load(store: S) -> Self {
        let username = match store.get(CURRENT_USER_KEY) {
            Ok(username) => username.filter(|name| !name.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted session");
                None
            },
        };
        Self { store, username }
    }

    /// Logged-in username.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// True if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Record `username` as logged in.
    pub fn login(&mut self, username: &str) -> Result<(), StoreError> {
        self.username = Some(username.to_string());
        self.store.set(CURRENT_USER_KEY, username)
    }

    /// Forget the user and the remembered view.
    ///
    /// Both keys are removed even if the first removal fails. Each failure
    /// is logged; the first one is returned.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.username = None;
        let mut outcome = Ok(());
        for key in [CURRENT_USER_KEY, LAST_VIEW_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear persisted session");
                if outcome.is_ok() {
                    outcome = Err(e);
                }
            }
        }
        outcome
    }

    /// Persisted view, if present and an authenticated view.
    pub fn last_view(&self) -> Option<View> {
        match self.store.get(LAST_VIEW_KEY) {
            Ok(Some(name)) => name.parse::<View>().ok().filter(|view| view.is_authenticated()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted view");
                None
            },
        }
    }

    /// Persist `view` as the one to restore.
    ///
    /// Only authenticated views are remembered, and only while logged in.
    /// Returns whether anything was written.
    pub fn remember_view(&self, view: View) -> Result<bool, StoreError> {
        if self.username.is_none() || !view.is_authenticated() {
            return Ok(false);
        }
        self.store.set(LAST_VIEW_KEY, view.name()).map(|()| true)
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use finstagram_store::MemoryStore;

    use super::*;

    /// Rejects the first `remove`, then behaves like the wrapped store.
    #[derive(Clone)]
    struct FirstRemoveFails {
        inner: MemoryStore,
        failed: Arc<AtomicBool>,
    }

    impl FirstRemoveFails {
        fn new(inner: MemoryStore) -> Self {
            Self { inner, failed: Arc::new(AtomicBool::new(false)) }
        }
    }

    impl KeyValueStore for FirstRemoveFails {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            if self.failed.swap(true, Ordering::SeqCst) {
                self.inner.remove(key)
            } else {
                Err(StoreError::Io("disk full".to_string()))
            }
        }
    }

    #[test]
    fn load_reads_current_user() {
        let store = MemoryStore::with_entries([(CURRENT_USER_KEY, "abc")]);
        let session = SessionStore::load(store);

        assert_eq!(session.username(), Some("abc"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn empty_username_is_logged_out() {
        let store = MemoryStore::with_entries([(CURRENT_USER_KEY, "")]);
        assert!(!SessionStore::load(store).is_authenticated());
    }

    #[test]
    fn login_persists_user() {
        let store = MemoryStore::new();
        let mut session = SessionStore::load(store.clone());

        session.login("abc").unwrap();

        assert_eq!(store.get(CURRENT_USER_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(SessionStore::load(store).username(), Some("abc"));
    }

    #[test]
    fn logout_clears_both_keys() {
        let store =
            MemoryStore::with_entries([(CURRENT_USER_KEY, "abc"), (LAST_VIEW_KEY, "reels")]);
        let mut session = SessionStore::load(store.clone());

        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert!(store.is_empty());
    }

    #[test]
    fn logout_clears_view_without_user() {
        let store = MemoryStore::with_entries([(LAST_VIEW_KEY, "reels")]);
        let mut session = SessionStore::load(store.clone());

        session.logout().unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn logout_clears_view_when_user_removal_fails() {
        let inner =
            MemoryStore::with_entries([(CURRENT_USER_KEY, "abc"), (LAST_VIEW_KEY, "reels")]);
        let mut session = SessionStore::load(FirstRemoveFails::new(inner.clone()));

        let err = session.logout().unwrap_err();

        assert_eq!(err, StoreError::Io("disk full".to_string()));
        assert!(!session.is_authenticated());
        assert_eq!(inner.get(LAST_VIEW_KEY).unwrap(), None);
        assert_eq!(inner.get(CURRENT_USER_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn remember_view_skips_unauthenticated_views() {
        let store = MemoryStore::new();
        let mut session = SessionStore::load(store.clone());

        assert!(!session.remember_view(View::Reels).unwrap());
        session.login("abc").unwrap();
        assert!(!session.remember_view(View::ProfileSetup).unwrap());
        assert!(session.remember_view(View::Reels).unwrap());

        assert_eq!(session.last_view(), Some(View::Reels));
    }

    #[test]
    fn unrecognised_view_is_ignored() {
        let store =
            MemoryStore::with_entries([(CURRENT_USER_KEY, "abc"), (LAST_VIEW_KEY, "settings")]);
        assert_eq!(SessionStore::load(store).last_view(), None);

        let store =
            MemoryStore::with_entries([(CURRENT_USER_KEY, "abc"), (LAST_VIEW_KEY, "signup")]);
        assert_eq!(SessionStore::load(store).last_view(), None);
    }
}
