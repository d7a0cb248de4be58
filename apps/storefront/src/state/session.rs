//! # Session State
//!
//! The current-user slot plus its durable copy under key `user`.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sleep(login_delay)           ◄── simulated round trip                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authenticate(email, password) ── admin pair? ──► admin account        │
//! │       │                                    else ──► regular account    │
//! │       ▼                                                                 │
//! │  lock slot ──► repo.save(&user) ──┬── Ok  ──► slot = Some(user)        │
//! │                                   └── Err ──► slot unchanged, Err      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The slot is only changed after the durable write succeeds, so memory and
//! storage never disagree.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use autoparts_core::auth::{authenticate, register_user};
use autoparts_core::{CoreResult, IdGenerator, Session, User};
use autoparts_db::{DbResult, KeyValueStore, SessionRepository};

/// Session state backed by a key-value store.
#[derive(Debug)]
pub struct SessionState<S> {
    session: Mutex<Session>,
    repo: SessionRepository<S>,
    ids: IdGenerator,
    login_delay: Duration,
}

impl<S: KeyValueStore> SessionState<S> {
    /// Restores the persisted user, if any.
    ///
    /// ## Returns
    /// * `Err(DbError::Serialization)` - The stored user is unreadable
    pub async fn restore(repo: SessionRepository<S>, login_delay: Duration) -> DbResult<Self> {
        let session = match repo.load().await? {
            Some(user) => Session::authenticated(user),
            None => Session::anonymous(),
        };

        let ids = IdGenerator::new();
        if let Some(user) = session.user() {
            ids.observe(user.id);
        }

        Ok(SessionState {
            session: Mutex::new(session),
            repo,
            ids,
            login_delay,
        })
    }

    /// Signs in. Any credentials succeed; only a storage failure is an error.
    pub async fn login(&self, email: &str, password: &str) -> DbResult<User> {
        tokio::time::sleep(self.login_delay).await;

        let user = authenticate(email, password);
        self.replace_user(user).await
    }

    /// Creates a regular account with a fresh id and signs it in.
    ///
    /// The password is accepted and discarded.
    pub async fn register(&self, email: &str, _password: &str, name: &str) -> DbResult<User> {
        tokio::time::sleep(self.login_delay).await;

        let user = register_user(self.ids.next_id(), email, name);
        debug!(user_id = user.id, "Registered new account");
        self.replace_user(user).await
    }

    /// Signs out and removes the durable record.
    ///
    /// ## Returns
    /// The user that was signed in, if any.
    pub async fn logout(&self) -> DbResult<Option<User>> {
        let mut session = self.session.lock().await;
        self.repo.clear().await?;

        let previous = session.sign_out();
        if let Some(user) = &previous {
            info!(user_id = user.id, "Signed out");
        }
        Ok(previous)
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.lock().await.user().cloned()
    }

    /// True iff the current user is an administrator.
    pub async fn is_admin(&self) -> bool {
        self.session.lock().await.is_admin()
    }

    /// The signed-in user, or `AuthenticationRequired`.
    pub async fn require_user(&self) -> CoreResult<User> {
        let session = self.session.lock().await;
        let result = session.require_user().cloned();
        if result.is_err() {
            warn!("Profile requested without a session");
        }
        result
    }

    /// The signed-in administrator, or `AuthenticationRequired` / `AdminRequired`.
    pub async fn require_admin(&self) -> CoreResult<User> {
        let session = self.session.lock().await;
        let result = session.require_admin().cloned();
        if let Err(err) = &result {
            warn!(error = %err, "Admin gate refused");
        }
        result
    }

    async fn replace_user(&self, user: User) -> DbResult<User> {
        let mut session = self.session.lock().await;
        self.repo.save(&user).await?;

        info!(
            user_id = user.id,
            email = %user.email,
            role = ?user.role,
            "Signed in"
        );
        session.sign_in(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoparts_core::auth::{ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_USER_ID};
    use autoparts_core::{CoreError, Role};
    use autoparts_db::{DbError, MemoryStore, USER_KEY};
    use std::collections::HashSet;

    async fn fresh(store: &MemoryStore) -> SessionState<MemoryStore> {
        SessionState::restore(SessionRepository::new(store.clone()), Duration::ZERO)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_admin_login_persists() {
        let store = MemoryStore::new();
        let state = fresh(&store).await;

        let user = state.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        assert_eq!(user.id, ADMIN_USER_ID);
        assert!(state.is_admin().await);
        assert!(store.contains_key(USER_KEY));

        // A restart restores the same user
        let restarted = fresh(&store).await;
        assert_eq!(restarted.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn test_regular_login() {
        let state = fresh(&MemoryStore::new()).await;

        let user = state.login("x@y.com", "anything").await.unwrap();
        assert_eq!(user.name, "x");
        assert_eq!(user.role, Role::User);
        assert!(!state.is_admin().await);
        assert!(matches!(state.require_admin().await, Err(CoreError::AdminRequired)));
    }

    #[tokio::test]
    async fn test_register_issues_unseen_ids() {
        let state = fresh(&MemoryStore::new()).await;

        let mut ids = HashSet::new();
        for n in 0..20 {
            let user = state
                .register(&format!("u{}@mail.ru", n), "pw", "Иван")
                .await
                .unwrap();
            assert_eq!(user.role, Role::User);
            assert!(ids.insert(user.id));
        }
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let store = MemoryStore::new();
        let state = fresh(&store).await;
        state.login("x@y.com", "p").await.unwrap();

        let previous = state.logout().await.unwrap();
        assert_eq!(previous.map(|u| u.name), Some("x".to_string()));
        assert!(!store.contains_key(USER_KEY));
        assert!(matches!(
            state.require_user().await,
            Err(CoreError::AuthenticationRequired)
        ));

        // Logging out twice is harmless
        assert_eq!(state.logout().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_slot_unchanged() {
        let store = MemoryStore::new();
        let state = fresh(&store).await;
        state.login("x@y.com", "p").await.unwrap();

        store.set_unavailable(true);
        let result = state.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert!(matches!(result, Err(DbError::Unavailable(_))));
        assert!(!state.is_admin().await);

        assert!(state.logout().await.is_err());
        assert!(state.current().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_unreadable_record_fails_restore() {
        let store = MemoryStore::with_entry(USER_KEY, "not json");
        let result = SessionState::restore(SessionRepository::new(store), Duration::ZERO).await;
        assert!(matches!(result, Err(DbError::Serialization(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_the_configured_delay() {
        let store = MemoryStore::new();
        let state = SessionState::restore(
            SessionRepository::new(store),
            Duration::from_millis(500),
        )
        .await
        .unwrap();

        let started = tokio::time::Instant::now();
        state.login("x@y.com", "p").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
