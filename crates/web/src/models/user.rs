//! User domain type.

use secrecy::{ExposeSecret, SecretString};

/// A registered user.
///
/// The password is stored as given. `SecretString` only keeps it out of
/// `Debug` output and logs.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique username.
    pub username: String,
    password: SecretString,
}

impl User {
    /// Create a user record.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Plain string comparison against the stored password.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches_exactly() {
        let user = User::new("alice", "pw");
        assert!(user.password_matches("pw"));
        assert!(!user.password_matches("PW"));
        assert!(!user.password_matches("pw "));
        assert!(!user.password_matches(""));
    }

    #[test]
    fn test_debug_hides_password() {
        let user = User::new("alice", "hunter2");
        let debug_output = format!("{user:?}");
        assert!(debug_output.contains("alice"));
        assert!(!debug_output.contains("hunter2"));
    }
}
