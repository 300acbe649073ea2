//! Low-level key-value storage backend trait and supporting types.
//!
//! The [`StorageBackend`] trait is the contract every storage engine
//! implements: [`get`](StorageBackend::get), [`put`](StorageBackend::put),
//! [`delete`](StorageBackend::delete) and
//! [`list_by_prefix`](StorageBackend::list_by_prefix).
//!
//! Domain logic (id minting, owner filtering, serialization) does **not**
//! belong here. Backends are dumb KV stores; domain logic lives in
//! [`GenericTodoStore`](crate::store::generic::GenericTodoStore).
//!
//! # Key Structure
//!
//! Keys are composite strings in the format `{collection}/{id}`, mirroring
//! a document path. Listing a collection uses the prefix `{collection}/`.

use std::fmt;

use async_trait::async_trait;

/// Errors that can occur during raw storage operations.
///
/// `GenericTodoStore` maps these onto [`StoreError`](crate::error::StoreError)
/// before they reach callers.
///
/// # Examples
///
/// ```
/// use todolist_store::store::backend::StorageError;
///
/// let err = StorageError::NotFound { key: "todos/abc".to_string() };
/// assert!(err.to_string().contains("todos/abc"));
/// ```
#[derive(Debug)]
pub enum StorageError {
    /// The requested key was not found in storage.
    NotFound {
        /// The key that was not found.
        key: String,
    },

    /// An I/O or backend-specific error occurred (network failure,
    /// permission denied, quota exhausted).
    Backend {
        /// Human-readable description of the error.
        message: String,
        /// The underlying error, if available. Accessible via
        /// [`std::error::Error::source()`].
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Shorthand for a [`StorageError::Backend`] without an underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "key not found: {key}"),
            Self::Backend { message, .. } => write!(f, "backend error: {message}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend {
                source: Some(src), ..
            } => Some(src.as_ref()),
            _ => None,
        }
    }
}

/// Key-value storage backend for document persistence.
///
/// # Key Format
///
/// Keys are `{collection}/{id}`. Backends must store and return keys
/// verbatim.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; coordinators issue calls from
/// spawned tasks.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Retrieves the document bytes stored at `key`.
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] if no document exists at `key`.
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Stores a document unconditionally (create or overwrite).
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Deletes the document at `key`.
    ///
    /// Returns `true` if the key existed, `false` otherwise (idempotent).
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Lists every `(key, bytes)` pair whose key starts with `prefix`.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Backend`] on I/O or backend-specific failures.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, StorageError>;
}

/// Constructs a storage key from a collection name and document id.
///
/// # Examples
///
/// ```
/// use todolist_store::store::backend::make_key;
///
/// assert_eq!(make_key("todos", "abc"), "todos/abc");
/// ```
pub fn make_key(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

/// Constructs the prefix that lists every document in `collection`.
///
/// # Examples
///
/// ```
/// use todolist_store::store::backend::make_prefix;
///
/// assert_eq!(make_prefix("todos"), "todos/");
/// ```
pub fn make_prefix(collection: &str) -> String {
    format!("{collection}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = StorageError::NotFound {
            key: "todos/1".to_string(),
        };
        assert_eq!(err.to_string(), "key not found: todos/1");

        let err = StorageError::backend("connection reset");
        assert_eq!(err.to_string(), "backend error: connection reset");
    }

    #[test]
    fn storage_error_source_backend_with_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = StorageError::Backend {
            message: "write failed".to_string(),
            source: Some(Box::new(inner)),
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("timed out"));
    }

    #[test]
    fn storage_error_source_not_found_returns_none() {
        let err = StorageError::NotFound {
            key: "k".to_string(),
        };
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn make_key_keeps_id_verbatim() {
        assert_eq!(make_key("todos", "a/b"), "todos/a/b");
    }

    #[test]
    fn make_prefix_matches_key_prefix() {
        let prefix = make_prefix("todos");
        assert!(make_key("todos", "x").starts_with(&prefix));
        assert!(!make_key("todos_archive", "x").starts_with(&prefix));
    }
}
