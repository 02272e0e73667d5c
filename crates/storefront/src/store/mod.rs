//! Key/value storage for site data.
//!
//! # Layout
//!
//! Every collection lives under its own top-level key as JSON text:
//!
//! - `users` - Registered accounts
//! - `products` - Product catalog (seeded)
//! - `news` - News articles (seeded)
//! - `cart` - Shopping cart lines
//! - `currentUser` - The logged-in account, if any
//!
//! # Backends
//!
//! [`KeyValueStore`] is the raw text interface. [`MemoryStore`] keeps values
//! for the lifetime of the process; [`FileStore`] persists them to a JSON file.
//! [`Storage`] wraps a backend and handles (de)serialization.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Top-level storage keys.
pub mod keys {
    /// Key for registered users.
    pub const USERS: &str = "users";

    /// Key for the product catalog.
    pub const PRODUCTS: &str = "products";

    /// Key for news articles.
    pub const NEWS: &str = "news";

    /// Key for cart lines.
    pub const CART: &str = "cart";

    /// Key for the logged-in user.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    CorruptFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be parsed and the policy is strict.
    #[error("malformed value stored under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw string-keyed text storage.
///
/// Reads never fail: a backend that cannot produce a value reports it as
/// missing. Writes may fail for backends with external state.
pub trait KeyValueStore: Send + Sync {
    /// Returns the text stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot persist the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backend cannot persist the removal.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Result of reading a typed value.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The key holds a value of the requested shape.
    Found(T),
    /// Nothing is stored under the key.
    Absent,
    /// Text is stored under the key but it does not parse.
    Malformed(serde_json::Error),
}

impl<T> Lookup<T> {
    /// Returns the value if one was found, discarding the reason otherwise.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent | Self::Malformed(_) => None,
        }
    }
}

/// How to treat stored text that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Treat it as absent and fall back to the default.
    #[default]
    Lenient,
    /// Report it as `StoreError::Malformed`.
    Strict,
}

/// Typed JSON storage over a [`KeyValueStore`] backend.
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
    policy: MalformedPolicy,
}

impl Storage {
    /// Create a storage wrapper with the lenient malformed-data policy.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            policy: MalformedPolicy::default(),
        }
    }

    /// Create an in-memory storage (for tests and throwaway sessions).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Set the malformed-data policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the malformed-data policy.
    #[must_use]
    pub const fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    /// Read and parse the value stored under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        let Some(text) = self.backend.get_item(key) else {
            return Lookup::Absent;
        };

        match serde_json::from_str(&text) {
            Ok(value) => Lookup::Found(value),
            Err(e) => Lookup::Malformed(e),
        }
    }

    /// Read the value under `key`, or `None` when it is absent.
    ///
    /// Malformed values are `None` under the lenient policy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` for malformed values under the strict policy.
    pub fn get_optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key) {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Absent => Ok(None),
            Lookup::Malformed(source) => self.on_malformed(key, source).map(|()| None),
        }
    }

    /// Read the value under `key`, falling back to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Malformed` for malformed values under the strict policy.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StoreError> {
        self.get_optional(key).map(Option::unwrap_or_default)
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` if the value cannot be encoded, or the
    /// backend's error if the write fails.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &text)
    }

    /// Remove the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the removal cannot be persisted.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove_item(key)
    }

    /// Apply the malformed-data policy to a parse failure under `key`.
    pub(crate) fn on_malformed(
        &self,
        key: &str,
        source: serde_json::Error,
    ) -> Result<(), StoreError> {
        match self.policy {
            MalformedPolicy::Lenient => {
                tracing::warn!(key, error = %source, "Ignoring malformed stored value");
                Ok(())
            }
            MalformedPolicy::Strict => Err(StoreError::Malformed {
                key: key.to_string(),
                source,
            }),
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
