//! Authentication service.
//!
//! Plaintext username/password accounts and cookie-token sessions. There is no
//! hashing, no expiry and no logout; a session lasts until the process exits.

mod error;

pub use error::AuthError;

use memopad_core::SessionId;

use crate::models::Session;
use crate::store::Store;

/// Authentication service.
///
/// Handles user registration, login, and session validation on top of the
/// shared [`Store`].
pub struct AuthService<'a> {
    store: &'a Store,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the username is taken. The
    /// existing account is left untouched.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.store.insert_user(username, password) {
            tracing::info!(username, "user registered");
            Ok(())
        } else {
            tracing::debug!(username, "registration rejected: username taken");
            Err(AuthError::UserAlreadyExists)
        }
    }

    /// Check credentials and open a new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the user does not exist or
    /// the password differs. No session is created in that case.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if !self.store.password_matches(username, password) {
            tracing::debug!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.store.create_session(username);
        tracing::info!(username, session_id = %session.id, "session created");
        Ok(session)
    }

    /// Username bound to a session cookie value, if it names a live session.
    #[must_use]
    pub fn current_user(&self, session_id: Option<&str>) -> Option<String> {
        let id = SessionId::from_cookie(session_id?);
        self.store.session(&id).map(|session| session.username)
    }

    /// Whether a session cookie value names a live session.
    #[must_use]
    pub fn is_logged_in(&self, session_id: Option<&str>) -> bool {
        self.current_user(session_id).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_login() {
        let store = Store::default();
        let auth = AuthService::new(&store);

        auth.register("alice", "pw").unwrap();
        let session = auth.login("alice", "pw").unwrap();

        assert_eq!(session.username, "alice");
        assert_eq!(session.id.as_str(), "1");
    }

    #[test]
    fn test_register_twice_creates_one_user() {
        let store = Store::default();
        let auth = AuthService::new(&store);

        auth.register("alice", "pw").unwrap();
        assert_eq!(
            auth.register("alice", "other"),
            Err(AuthError::UserAlreadyExists)
        );
        assert_eq!(store.user_count(), 1);

        // Original password still works.
        assert!(auth.login("alice", "pw").is_ok());
        assert!(auth.login("alice", "other").is_err());
    }

    #[test]
    fn test_login_failures_leave_sessions_unchanged() {
        let store = Store::default();
        let auth = AuthService::new(&store);
        auth.register("alice", "pw").unwrap();

        for (username, password) in [
            ("alice", "wrong"),
            ("alice", ""),
            ("alice", "PW"),
            ("bob", "pw"),
            ("", ""),
        ] {
            assert_eq!(
                auth.login(username, password),
                Err(AuthError::InvalidCredentials)
            );
        }

        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn test_empty_credentials_are_ordinary_values() {
        let store = Store::default();
        let auth = AuthService::new(&store);

        auth.register("", "").unwrap();
        assert!(auth.login("", "").is_ok());
    }

    #[test]
    fn test_is_logged_in() {
        let store = Store::default();
        let auth = AuthService::new(&store);
        auth.register("alice", "pw").unwrap();
        let session = auth.login("alice", "pw").unwrap();

        assert!(!auth.is_logged_in(None));
        assert!(!auth.is_logged_in(Some("")));
        assert!(!auth.is_logged_in(Some("42")));
        assert!(auth.is_logged_in(Some(session.id.as_str())));
    }

    #[test]
    fn test_current_user() {
        let store = Store::default();
        let auth = AuthService::new(&store);
        auth.register("alice", "pw").unwrap();
        auth.register("bob", "pw").unwrap();
        let alice = auth.login("alice", "pw").unwrap();
        let bob = auth.login("bob", "pw").unwrap();

        assert_eq!(auth.current_user(Some(alice.id.as_str())).as_deref(), Some("alice"));
        assert_eq!(auth.current_user(Some(bob.id.as_str())).as_deref(), Some("bob"));
        assert_eq!(auth.current_user(Some("3")), None);
    }
}
