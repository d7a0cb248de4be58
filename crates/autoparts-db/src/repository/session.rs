//! # Session Repository
//!
//! The signed-in user, stored as one JSON object under key `user`.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::kv::KeyValueStore;
use autoparts_core::User;

/// Durable key holding the current user.
pub const USER_KEY: &str = "user";

/// Repository for the persisted session.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.sessions();
/// repo.save(&user).await?;
/// assert_eq!(repo.load().await?, Some(user));
/// repo.clear().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SessionRepository<S> {
    pub fn new(store: S) -> Self {
        SessionRepository { store }
    }

    /// Reads the persisted user.
    ///
    /// ## Returns
    /// * `Ok(None)` - Nobody signed in
    /// * `Err(DbError::Serialization)` - The stored value is not a valid user
    pub async fn load(&self) -> DbResult<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY).await? else {
            debug!("No persisted session");
            return Ok(None);
        };

        let user: User = serde_json::from_str(&raw)?;
        info!(user_id = user.id, email = %user.email, "Restored session");
        Ok(Some(user))
    }

    /// Overwrites the persisted user.
    pub async fn save(&self, user: &User) -> DbResult<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &raw).await?;
        debug!(user_id = user.id, "Session persisted");
        Ok(())
    }

    /// Removes the persisted user. Succeeds when nothing is stored.
    pub async fn clear(&self) -> DbResult<()> {
        self.store.delete(USER_KEY).await?;
        debug!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::kv::MemoryStore;
    use crate::pool::{Database, DbConfig};
    use autoparts_core::auth::{authenticate, ADMIN_EMAIL, ADMIN_PASSWORD};
    use autoparts_core::Role;

    #[tokio::test]
    async fn test_round_trip_in_memory() {
        let store = MemoryStore::new();
        let repo = SessionRepository::new(store.clone());
        let user = authenticate(ADMIN_EMAIL, ADMIN_PASSWORD);

        assert_eq!(repo.load().await.unwrap(), None);

        repo.save(&user).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(user));
        assert!(store.contains_key(USER_KEY));

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_round_trip_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = authenticate("ivan@mail.ru", "secret");

        db.sessions().save(&user).await.unwrap();
        let restored = db.sessions().load().await.unwrap().unwrap();

        assert_eq!(restored, user);
        assert_eq!(restored.role, Role::User);
        assert_eq!(restored.name, "ivan");
    }

    #[tokio::test]
    async fn test_reads_browser_shaped_record() {
        let store = MemoryStore::with_entry(
            USER_KEY,
            r#"{"id":1,"email":"admin@autoparts.ru","name":"Администратор","role":"admin"}"#,
        );

        let user = SessionRepository::new(store).load().await.unwrap().unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_malformed_record_is_an_error() {
        let store = MemoryStore::with_entry(USER_KEY, "{not json");
        let result = SessionRepository::new(store).load().await;
        assert!(matches!(result, Err(DbError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_save_failure_surfaces() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        let result = SessionRepository::new(store)
            .save(&authenticate("x@y.com", "p"))
            .await;
        assert!(matches!(result, Err(DbError::Unavailable(_))));
    }
}
