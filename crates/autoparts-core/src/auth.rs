//! # Mock Authentication
//!
//! Credential rules and the current-session gate.
//!
//! ## No Real Verification
//! There is no backend. Any email/password pair signs in: the one admin
//! pair yields the admin account, everything else yields a regular account
//! named after the email's local part. Registration always succeeds.
//! This is the intended demo behaviour, not a missing check.
//!
//! ## Session State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐   login / register   ┌───────────────┐                 │
//! │   │ Anonymous │ ───────────────────► │ Authenticated │                 │
//! │   │ user=None │ ◄─────────────────── │ user=Some(..) │                 │
//! │   └───────────┘        logout        └───────────────┘                 │
//! │                                                                         │
//! │   require_user()  ── Anonymous ──► AuthenticationRequired              │
//! │   require_admin() ── not admin ──► AdminRequired                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Role, User};

/// Email that signs in as the administrator.
pub const ADMIN_EMAIL: &str = "admin@autoparts.ru";

/// Password that, together with [`ADMIN_EMAIL`], signs in as the administrator.
pub const ADMIN_PASSWORD: &str = "admin";

/// Fixed id of the administrator account.
pub const ADMIN_USER_ID: i64 = 1;

/// Display name of the administrator account.
pub const ADMIN_DISPLAY_NAME: &str = "Администратор";

/// Fixed id given to every non-admin login.
pub const REGULAR_USER_ID: i64 = 2;

/// Resolves a login attempt to an account. Never fails.
///
/// ## Example
/// ```rust
/// use autoparts_core::auth::authenticate;
/// use autoparts_core::Role;
///
/// assert_eq!(authenticate("admin@autoparts.ru", "admin").role, Role::Admin);
///
/// let user = authenticate("x@y.com", "anything");
/// assert_eq!(user.role, Role::User);
/// assert_eq!(user.name, "x");
/// ```
pub fn authenticate(email: &str, password: &str) -> User {
    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
        return User {
            id: ADMIN_USER_ID,
            email: ADMIN_EMAIL.to_string(),
            name: ADMIN_DISPLAY_NAME.to_string(),
            role: Role::Admin,
        };
    }

    User {
        id: REGULAR_USER_ID,
        email: email.to_string(),
        name: display_name_from_email(email).to_string(),
        role: Role::User,
    }
}

/// Builds the account created by registration. The password is not stored.
pub fn register_user(id: i64, email: &str, name: &str) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role: Role::User,
    }
}

/// The part of `email` before the first `@` (the whole string if there is none).
pub fn display_name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

// =============================================================================
// Session
// =============================================================================

/// The single current-user slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Session { user: None }
    }

    /// A session for `user`.
    pub fn authenticated(user: User) -> Self {
        Session { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True iff the current user has the admin role.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Replaces the current user.
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Clears the slot and returns whoever was signed in.
    pub fn sign_out(&mut self) -> Option<User> {
        self.user.take()
    }

    /// Gate for views that need any signed-in user (the profile page).
    pub fn require_user(&self) -> CoreResult<&User> {
        self.user.as_ref().ok_or(CoreError::AuthenticationRequired)
    }

    /// Gate for the admin catalog.
    pub fn require_admin(&self) -> CoreResult<&User> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(CoreError::AdminRequired);
        }
        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_credentials() {
        let user = authenticate(ADMIN_EMAIL, ADMIN_PASSWORD);
        assert_eq!(user.id, ADMIN_USER_ID);
        assert_eq!(user.name, ADMIN_DISPLAY_NAME);
        assert!(user.is_admin());
    }

    #[test]
    fn test_admin_email_with_wrong_password_is_regular_user() {
        let user = authenticate(ADMIN_EMAIL, "wrong");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.id, REGULAR_USER_ID);
        assert_eq!(user.name, "admin");
        assert_eq!(user.email, ADMIN_EMAIL);
    }

    #[test]
    fn test_any_credentials_sign_in() {
        let user = authenticate("x@y.com", "anything");
        assert_eq!(user.name, "x");
        assert_eq!(user.role, Role::User);

        let user = authenticate("no-at-sign", "");
        assert_eq!(user.name, "no-at-sign");
    }

    #[test]
    fn test_register_user() {
        let user = register_user(1_700_000_000_000, "ivan@mail.ru", "Иван");
        assert_eq!(user.name, "Иван");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_session_transitions() {
        let mut session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(matches!(session.require_user(), Err(CoreError::AuthenticationRequired)));

        session.sign_in(authenticate("x@y.com", "p"));
        assert!(session.require_user().is_ok());
        assert!(!session.is_admin());
        assert!(matches!(session.require_admin(), Err(CoreError::AdminRequired)));

        session.sign_in(authenticate(ADMIN_EMAIL, ADMIN_PASSWORD));
        assert!(session.is_admin());
        assert!(session.require_admin().is_ok());

        let previous = session.sign_out();
        assert_eq!(previous.map(|u| u.role), Some(Role::Admin));
        assert!(matches!(session.require_admin(), Err(CoreError::AuthenticationRequired)));
    }
}
