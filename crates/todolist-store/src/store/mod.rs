//! Task store gateway trait, generic implementation, and backends.
//!
//! # Architecture
//!
//! The storage system has three layers:
//!
//! 1. **[`TodoStore`]** -- the gateway the application talks to, used as
//!    `Arc<dyn TodoStore>` by every coordinator.
//!
//! 2. **[`GenericTodoStore<B>`](generic::GenericTodoStore)** -- all domain
//!    logic (id minting, owner filtering, id checks, canonical JSON
//!    serialization). Has a blanket `TodoStore` impl.
//!
//! 3. **[`StorageBackend`]** -- dumb KV trait that backends implement.
//!
//! # Backends
//!
//! - [`InMemoryBackend`](memory::InMemoryBackend) -- thread-safe in-memory
//!   backend using `DashMap`, wrapped by
//!   [`InMemoryTodoStore`](memory::InMemoryTodoStore).

pub mod backend;
pub mod generic;
pub mod memory;

use async_trait::async_trait;

pub use backend::{StorageBackend, StorageError};

use crate::domain::TodoRecord;
use crate::error::StoreError;

/// Name of the collection that holds to-do documents.
pub const DEFAULT_COLLECTION: &str = "todos";

/// Store-level configuration.
///
/// # Examples
///
/// ```
/// use todolist_store::store::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.collection, "todos");
///
/// let config = StoreConfig::default().with_collection("todos_staging");
/// assert_eq!(config.collection, "todos_staging");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Collection (key prefix) the store reads and writes.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl StoreConfig {
    /// Sets the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

/// Gateway to the external document store.
///
/// Every call is asynchronous and resolves to a tagged result; no
/// implementation may panic on backend failure.
///
/// A blanket implementation is provided for
/// [`GenericTodoStore<B>`](generic::GenericTodoStore).
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Returns every record whose owner equals `owner_id`.
    ///
    /// No ordering is guaranteed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Backend`] on backend failures.
    /// - [`StoreError::Serialization`] if a stored document is malformed.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TodoRecord>, StoreError>;

    /// Persists a new record under a freshly minted id.
    ///
    /// Any id already present on `todo` is ignored. Returns the stored
    /// record, whose `id` is the assigned one.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Backend`] if the write does not complete.
    async fn create(&self, todo: TodoRecord) -> Result<TodoRecord, StoreError>;

    /// Overwrites the record stored at `todo.id` in full.
    ///
    /// Existence is not checked: writing to an unknown id stores it.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingId`] if `todo.id` is empty.
    /// - [`StoreError::Backend`] if the write does not complete.
    async fn update(&self, todo: TodoRecord) -> Result<(), StoreError>;

    /// Deletes the record at `id`. Deleting an unknown id succeeds.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Backend`] on backend failures.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Fetches the record at `id`, or `None` when nothing is stored there.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Backend`] on backend failures.
    /// - [`StoreError::Serialization`] if the stored document is malformed.
    async fn get_by_id(&self, id: &str) -> Result<Option<TodoRecord>, StoreError>;
}

// ---- Blanket impl for GenericTodoStore<B> ----

#[async_trait]
impl<B: StorageBackend + 'static> TodoStore for generic::GenericTodoStore<B> {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TodoRecord>, StoreError> {
        self.list_by_owner(owner_id).await
    }

    async fn create(&self, todo: TodoRecord) -> Result<TodoRecord, StoreError> {
        self.create(todo).await
    }

    async fn update(&self, todo: TodoRecord) -> Result<(), StoreError> {
        self.update(todo).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.delete(id).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TodoRecord>, StoreError> {
        self.get_by_id(id).await
    }
}
