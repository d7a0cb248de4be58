//! # Auth Commands
//!
//! Login page, profile page and the logout button.
//!
//! ## Navigation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login / register ── Ok  ──► toast success ──► /profile                │
//! │                   └─ Err ──► toast "Ошибка" (stay on /login)           │
//! │                                                                         │
//! │  logout ──────────────────────────────────────► /                      │
//! │                                                                         │
//! │  open_profile ── nobody signed in ────────────► /login                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Credentials are never checked. The only failure is a storage error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::notify::{Navigator, Notification, Notifier, Route};
use crate::state::SessionState;
use autoparts_core::{Role, User};
use autoparts_db::KeyValueStore;

/// The signed-in account as the UI shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            is_admin: user.is_admin(),
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// Signs in and opens the profile page.
pub async fn login<S: KeyValueStore>(
    session: &SessionState<S>,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    email: &str,
    password: &str,
) -> Result<UserDto, ApiError> {
    debug!(email = %email, "login command");

    match session.login(email, password).await {
        Ok(user) => {
            notifier.notify(Notification::success("Вход выполнен", "Добро пожаловать!"));
            navigator.navigate(Route::Profile);
            Ok(user.into())
        }
        Err(err) => {
            notifier.notify(Notification::error("Неверный email или пароль"));
            Err(err.into())
        }
    }
}

/// Creates an account, signs it in and opens the profile page.
pub async fn register<S: KeyValueStore>(
    session: &SessionState<S>,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    email: &str,
    password: &str,
    name: &str,
) -> Result<UserDto, ApiError> {
    debug!(email = %email, "register command");

    match session.register(email, password, name).await {
        Ok(user) => {
            notifier.notify(Notification::success("Регистрация успешна", "Ваш аккаунт создан"));
            navigator.navigate(Route::Profile);
            Ok(user.into())
        }
        Err(err) => {
            notifier.notify(Notification::error("Не удалось создать аккаунт"));
            Err(err.into())
        }
    }
}

/// Signs out and returns to the storefront.
pub async fn logout<S: KeyValueStore>(
    session: &SessionState<S>,
    navigator: &dyn Navigator,
) -> Result<(), ApiError> {
    debug!("logout command");
    session.logout().await?;
    navigator.navigate(Route::Home);
    Ok(())
}

/// The profile page. Redirects to the login page when nobody is signed in.
pub async fn open_profile<S: KeyValueStore>(
    session: &SessionState<S>,
    navigator: &dyn Navigator,
) -> Result<UserDto, ApiError> {
    match session.require_user().await {
        Ok(user) => Ok(user.into()),
        Err(err) => {
            navigator.navigate(Route::Login);
            Err(err.into())
        }
    }
}

/// The current user, if any. Never redirects.
pub async fn current_user<S: KeyValueStore>(session: &SessionState<S>) -> Option<UserDto> {
    session.current_user().await.map(UserDto::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::{RecordingNavigator, RecordingNotifier, Severity};
    use autoparts_core::auth::{ADMIN_EMAIL, ADMIN_PASSWORD};
    use autoparts_db::{MemoryStore, SessionRepository};
    use std::time::Duration;

    struct Harness {
        store: MemoryStore,
        session: SessionState<MemoryStore>,
        notifier: RecordingNotifier,
        navigator: RecordingNavigator,
    }

    async fn harness() -> Harness {
        let store = MemoryStore::new();
        let session = SessionState::restore(SessionRepository::new(store.clone()), Duration::ZERO)
            .await
            .unwrap();
        Harness {
            store,
            session,
            notifier: RecordingNotifier::new(),
            navigator: RecordingNavigator::new(),
        }
    }

    #[tokio::test]
    async fn test_login_goes_to_profile() {
        let h = harness().await;

        let user = login(&h.session, &h.notifier, &h.navigator, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();

        assert!(user.is_admin);
        assert_eq!(user.name, "Администратор");
        assert_eq!(h.notifier.last().unwrap().title, "Вход выполнен");
        assert_eq!(h.navigator.last(), Some(Route::Profile));
    }

    #[tokio::test]
    async fn test_register_then_profile() {
        let h = harness().await;

        let user = register(&h.session, &h.notifier, &h.navigator, "ivan@mail.ru", "pw", "Иван")
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(h.notifier.last().unwrap().title, "Регистрация успешна");

        let profile = open_profile(&h.session, &h.navigator).await.unwrap();
        assert_eq!(profile, user);
    }

    #[tokio::test]
    async fn test_storage_failure_shows_error_toast() {
        let h = harness().await;
        h.store.set_unavailable(true);

        let err = login(&h.session, &h.notifier, &h.navigator, "x@y.com", "p")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        let toast = h.notifier.last().unwrap();
        assert_eq!(toast.severity, Severity::Destructive);
        assert_eq!(toast.description, "Неверный email или пароль");
        assert!(h.navigator.visited().is_empty());
        assert_eq!(current_user(&h.session).await, None);
    }

    #[tokio::test]
    async fn test_profile_without_session_redirects() {
        let h = harness().await;

        let err = open_profile(&h.session, &h.navigator).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(h.navigator.last(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_logout_returns_home() {
        let h = harness().await;
        login(&h.session, &h.notifier, &h.navigator, "x@y.com", "p")
            .await
            .unwrap();

        logout(&h.session, &h.navigator).await.unwrap();
        assert_eq!(h.navigator.last(), Some(Route::Home));
        assert_eq!(current_user(&h.session).await, None);
    }
}
