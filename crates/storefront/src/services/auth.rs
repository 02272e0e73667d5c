//! Registration, login and the current-user session.

use serde_json::Value;
use tracing::{info, instrument};

use crate::models::User;
use crate::store::{Storage, StoreError, keys};

/// Result of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The user was appended to `users`.
    Success,
    /// Another user already has this username; nothing was written.
    DuplicateUsername,
}

impl RegisterOutcome {
    /// Message shown to the visitor.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "Đăng ký thành công",
            Self::DuplicateUsername => "Tên đăng nhập đã tồn tại",
        }
    }

    /// Returns `true` for [`RegisterOutcome::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Account service.
pub struct AuthService<'a> {
    storage: &'a Storage,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Stored `users` records as raw JSON, whatever their shape.
    fn records(&self) -> Result<Vec<Value>, StoreError> {
        self.storage.get_or_default(keys::USERS)
    }

    /// All registered users, in registration order.
    ///
    /// Records that are not user objects are skipped under the lenient policy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `users` or one of its records is
    /// malformed under the strict policy.
    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        let mut users = Vec::new();
        for record in self.records()? {
            match serde_json::from_value(record) {
                Ok(user) => users.push(user),
                Err(source) => self.storage.on_malformed(keys::USERS, source)?,
            }
        }
        Ok(users)
    }

    /// Register a new user.
    ///
    /// Usernames are unique; comparison is exact. The user is appended to the
    /// stored records, which are written back unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if `users` cannot be read or written.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub fn register(&self, user: User) -> Result<RegisterOutcome, StoreError> {
        let mut records = self.records()?;

        let taken = records.iter().any(|record| {
            record.get("username").and_then(Value::as_str) == Some(user.username.as_str())
        });
        if taken {
            info!("Registration rejected: username taken");
            return Ok(RegisterOutcome::DuplicateUsername);
        }

        let record = serde_json::to_value(&user).map_err(|source| StoreError::Serialize {
            key: keys::USERS.to_string(),
            source,
        })?;
        records.push(record);
        self.storage.set(keys::USERS, &records)?;
        info!(total_users = records.len(), "User registered");
        Ok(RegisterOutcome::Success)
    }

    /// Find the first user whose username and password both match exactly.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `users` is malformed under the strict policy.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .users()?
            .into_iter()
            .find(|u| u.matches(username, password));

        if user.is_none() {
            info!("Login failed");
        }

        Ok(user)
    }

    /// Record `user` as the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the write fails.
    pub fn set_current_user(&self, user: &User) -> Result<(), StoreError> {
        self.storage.set(keys::CURRENT_USER, user)
    }

    /// The logged-in account, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` if `currentUser` is malformed under the strict policy.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        self.storage.get_optional(keys::CURRENT_USER)
    }

    /// Forget the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the removal fails.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StoreError> {
        self.storage.remove(keys::CURRENT_USER)?;
        info!("User logged out");
        Ok(())
    }
}
