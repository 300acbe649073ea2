//! Generic task store with all domain logic delegating to a [`StorageBackend`].
//!
//! [`GenericTodoStore`] implements every gateway operation (id minting on
//! insert, owner-equality filtering, id checks on update, canonical JSON
//! serialization) on top of any [`StorageBackend`].
//!
//! Backends remain dumb key-value stores; all intelligence lives here.
//!
//! # Construction
//!
//! ```
//! use todolist_store::store::generic::GenericTodoStore;
//! use todolist_store::store::memory::InMemoryBackend;
//! use todolist_store::store::StoreConfig;
//!
//! let store = GenericTodoStore::new(InMemoryBackend::new())
//!     .with_config(StoreConfig::default().with_collection("todos"));
//! assert_eq!(store.config().collection, "todos");
//! ```

use uuid::Uuid;

use crate::domain::TodoRecord;
use crate::error::StoreError;
use crate::store::backend::{make_key, make_prefix, StorageBackend, StorageError};
use crate::store::StoreConfig;

/// Minimal view of a stored document used to filter by owner.
#[derive(serde::Deserialize)]
struct OwnerField {
    #[serde(rename = "userId", alias = "ownerId")]
    owner_id: String,
}

/// Generic task store that delegates all storage to a [`StorageBackend`].
///
/// # Type Parameters
///
/// * `B` - A [`StorageBackend`] implementation.
#[derive(Debug)]
pub struct GenericTodoStore<B: StorageBackend> {
    backend: B,
    config: StoreConfig,
}

impl<B: StorageBackend> GenericTodoStore<B> {
    /// Creates a new store over `backend` using the `todos` collection.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: StoreConfig::default(),
        }
    }

    /// Sets the storage configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ---- Serialization helpers (private) ----

    fn serialize_record(record: &TodoRecord) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(record)
            .map_err(|e| StoreError::Serialization(format!("failed to serialize TodoRecord: {e}")))
    }

    fn deserialize_record(data: &[u8]) -> Result<TodoRecord, StoreError> {
        serde_json::from_slice(data).map_err(|e| {
            StoreError::Serialization(format!("failed to deserialize TodoRecord: {e}"))
        })
    }

    fn map_storage_error(err: StorageError) -> StoreError {
        match err {
            StorageError::NotFound { key } => StoreError::Backend(format!("no document at {key}")),
            StorageError::Backend {
                message,
                source: Some(source),
            } => StoreError::Backend(format!("{message}: {source}")),
            StorageError::Backend { message, .. } => StoreError::Backend(message),
        }
    }

    /// Reads only the owner field, so documents of other owners are never fully decoded.
    fn document_owner(data: &[u8]) -> Option<String> {
        serde_json::from_slice::<OwnerField>(data)
            .ok()
            .map(|doc| doc.owner_id)
    }

    fn key(&self, id: &str) -> String {
        make_key(&self.config.collection, id)
    }

    // ---- Gateway operations (public) ----

    /// Lists every record owned by `owner_id` (equality filter on the owner field).
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TodoRecord>, StoreError> {
        let prefix = make_prefix(&self.config.collection);
        let entries = self
            .backend
            .list_by_prefix(&prefix)
            .await
            .map_err(Self::map_storage_error)?;

        let mut records = Vec::new();
        for (key, data) in entries {
            match Self::document_owner(&data) {
                Some(owner) if owner == owner_id => records.push(Self::deserialize_record(&data)?),
                Some(_) => {},
                None => tracing::warn!(key = %key, "skipping document without a readable owner"),
            }
        }
        tracing::debug!(
            owner_id = owner_id,
            count = records.len(),
            "listed todos for owner"
        );
        Ok(records)
    }

    /// Mints a `UUIDv4` id, stores the record under it, and returns the stored record.
    pub async fn create(&self, todo: TodoRecord) -> Result<TodoRecord, StoreError> {
        let record = todo.with_id(Uuid::new_v4().to_string());
        let bytes = Self::serialize_record(&record)?;
        self.backend
            .put(&self.key(&record.id), &bytes)
            .await
            .map_err(Self::map_storage_error)?;
        tracing::debug!(todo_id = %record.id, owner_id = %record.owner_id, "created todo");
        Ok(record)
    }

    /// Overwrites the record at `todo.id`. Rejects transient records.
    pub async fn update(&self, todo: TodoRecord) -> Result<(), StoreError> {
        if !todo.is_persisted() {
            return Err(StoreError::MissingId);
        }
        let bytes = Self::serialize_record(&todo)?;
        self.backend
            .put(&self.key(&todo.id), &bytes)
            .await
            .map_err(Self::map_storage_error)?;
        tracing::debug!(todo_id = %todo.id, completed = todo.completed, "updated todo");
        Ok(())
    }

    /// Deletes the record at `id`; unknown ids are not an error.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let existed = self
            .backend
            .delete(&self.key(id))
            .await
            .map_err(Self::map_storage_error)?;
        tracing::debug!(todo_id = id, existed, "deleted todo");
        Ok(())
    }

    /// Fetches the record at `id`, mapping a missing key to `None`.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<TodoRecord>, StoreError> {
        match self.backend.get(&self.key(id)).await {
            Ok(data) => Self::deserialize_record(&data).map(Some),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(Self::map_storage_error(e)),
        }
    }
}
