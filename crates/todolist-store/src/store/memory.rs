//! In-memory storage backend and task store.
//!
//! [`InMemoryBackend`] provides a thread-safe [`StorageBackend`] using
//! `DashMap<String, Vec<u8>>`. It is a dumb KV store with no domain logic.
//!
//! [`InMemoryTodoStore`] is a thin wrapper around
//! [`GenericTodoStore<InMemoryBackend>`](crate::store::generic::GenericTodoStore)
//! with a zero-argument `new()` and `Default` impl. It stands in for the
//! managed document database in tests and local development.
//!
//! # Examples
//!
//! ```
//! use todolist_store::store::memory::InMemoryTodoStore;
//! use todolist_store::store::{StoreConfig, TodoStore};
//! use todolist_store::TodoRecord;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = InMemoryTodoStore::new().with_config(StoreConfig::default());
//! let stored = store
//!     .create(TodoRecord::new("uid-1", "Water plants", None))
//!     .await
//!     .unwrap();
//! let fetched = store.get_by_id(&stored.id).await.unwrap();
//! assert_eq!(fetched, Some(stored));
//! # });
//! ```

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::TodoRecord;
use crate::error::StoreError;
use crate::store::backend::{StorageBackend, StorageError};
use crate::store::generic::GenericTodoStore;

use super::{StoreConfig, TodoStore};

// ---- InMemoryBackend: dumb KV store using DashMap ----

/// Thread-safe in-memory storage backend using [`DashMap`].
#[derive(Debug)]
pub struct InMemoryBackend {
    data: DashMap<String, Vec<u8>>,
}

impl InMemoryBackend {
    /// Creates an empty in-memory backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use todolist_store::store::memory::InMemoryBackend;
    ///
    /// let backend = InMemoryBackend::new();
    /// assert!(backend.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Returns the number of documents stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the backend holds no documents.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.data
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.data.remove(key).is_some())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, StorageError> {
        Ok(self
            .data
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }
}

// ---- InMemoryTodoStore: thin wrapper around GenericTodoStore<InMemoryBackend> ----

/// In-memory task store using [`GenericTodoStore`] over [`InMemoryBackend`].
#[derive(Debug)]
pub struct InMemoryTodoStore {
    inner: GenericTodoStore<InMemoryBackend>,
}

impl InMemoryTodoStore {
    /// Creates an empty store over the default `todos` collection.
    pub fn new() -> Self {
        Self {
            inner: GenericTodoStore::new(InMemoryBackend::new()),
        }
    }

    /// Sets the storage configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.inner = self.inner.with_config(config);
        self
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        self.inner.config()
    }

    /// Returns the number of documents across all collections.
    pub fn len(&self) -> usize {
        self.inner.backend().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.backend().is_empty()
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---- TodoStore delegation impl ----

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TodoRecord>, StoreError> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn create(&self, todo: TodoRecord) -> Result<TodoRecord, StoreError> {
        self.inner.create(todo).await
    }

    async fn update(&self, todo: TodoRecord) -> Result<(), StoreError> {
        self.inner.update(todo).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TodoRecord>, StoreError> {
        self.inner.get_by_id(id).await
    }
}
