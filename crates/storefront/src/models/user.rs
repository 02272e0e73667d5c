//! User domain types.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// Fields are kept as plain strings so records written by any producer load;
/// the registration form validates them before a `User` is created. A missing
/// field reads as empty. The password is stored as entered.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Unique login name.
    pub username: String,
    /// Password as entered at registration.
    pub password: String,
    /// Contact email.
    pub email: String,
    /// Display name.
    pub fullname: String,
}

impl User {
    /// Create a user record.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        fullname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            fullname: fullname.into(),
        }
    }

    /// Returns `true` if both credentials match exactly.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("fullname", &self.fullname)
            .finish()
    }
}
