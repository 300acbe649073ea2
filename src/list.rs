//! Task list coordinator: the in-memory mirror of one user's tasks.
//!
//! [`TodoListCoordinator`] owns `items`, an ordered list of
//! [`TodoRecord`]s that mirrors the store for a single owner. It is the
//! only writer of that list. Screens read snapshots or subscribe.
//!
//! # Consistency rules
//!
//! - **Reload** replaces `items` wholesale on success and leaves them
//!   untouched on failure.
//! - **Toggle** and **delete** are optimistic: the local change is applied
//!   before the store call is issued, and by default it is kept even if
//!   the store call fails.
//! - **Create** and **update** are not optimistic: they never touch
//!   `items`; the screen reloads when it becomes active again.
//!
//! No mutex serializes operations. Toggles on different items interleave
//! freely; concurrent writes to the same item are last-writer-wins, both
//! locally and at the store.
//!
//! # Fire-and-forget dispatch
//!
//! [`dispatch`](TodoListCoordinator::dispatch) is what a screen calls from
//! an event handler. It applies the optimistic change synchronously and
//! runs the store call on a spawned task that holds only a weak reference
//! to the coordinator. If the coordinator is dropped before the call
//! completes, the completion is discarded.

use std::sync::{Arc, Weak};

use tokio::task::JoinHandle;
use todolist_store::{StoreError, TodoRecord, TodoStore};

use crate::error::{Result, ValidationError};
use crate::state::ViewState;
use crate::validation::validate_title;

/// Behavior switches for [`TodoListCoordinator`].
///
/// # Defaults
///
/// | Setting               | Default | Description                                        |
/// |-----------------------|---------|----------------------------------------------------|
/// | `rollback_on_failure` | false   | Undo an optimistic toggle/delete when the store call fails |
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ListConfig {
    /// Restore the previous local state when an optimistic store call fails.
    #[serde(default)]
    pub rollback_on_failure: bool,
}

impl ListConfig {
    /// Sets whether failed optimistic mutations are rolled back.
    pub fn with_rollback_on_failure(mut self, rollback: bool) -> Self {
        self.rollback_on_failure = rollback;
        self
    }
}

/// Fire-and-forget actions issued by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Re-fetch the owner's tasks.
    Reload,
    /// Set the completion flag of a task.
    Toggle {
        /// The task as the screen currently shows it.
        todo: TodoRecord,
        /// The new completion flag.
        completed: bool,
    },
    /// Remove a task.
    Delete(TodoRecord),
}

struct ListInner {
    store: Arc<dyn TodoStore>,
    owner_id: Option<String>,
    config: ListConfig,
    items: ViewState<Vec<TodoRecord>>,
}

impl ListInner {
    fn owner(&self) -> std::result::Result<&str, ValidationError> {
        self.owner_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::NotSignedIn)
    }

    fn settle_reload(
        &self,
        outcome: std::result::Result<Vec<TodoRecord>, StoreError>,
    ) -> Result<()> {
        match outcome {
            Ok(records) => {
                tracing::debug!(count = records.len(), "task list reloaded");
                self.items.set(records);
                Ok(())
            },
            Err(e) => {
                tracing::warn!(error = %e, "reload failed; keeping current items");
                Err(e.into())
            },
        }
    }

    /// Replaces the item with `updated.id`, returning what was there.
    fn apply_toggle(&self, updated: &TodoRecord) -> Option<TodoRecord> {
        let mut previous = None;
        self.items.update_if(|items| {
            match items.iter_mut().find(|item| item.id == updated.id) {
                Some(slot) => {
                    previous = Some(std::mem::replace(slot, updated.clone()));
                    true
                },
                None => false,
            }
        });
        previous
    }

    fn settle_toggle(
        &self,
        outcome: std::result::Result<(), StoreError>,
        updated: &TodoRecord,
        previous: Option<TodoRecord>,
    ) -> Result<()> {
        let Err(e) = outcome else {
            return Ok(());
        };
        tracing::warn!(todo_id = %updated.id, error = %e, "toggle not persisted");
        if let (true, Some(previous)) = (self.config.rollback_on_failure, previous) {
            // Only undo if nothing newer has replaced the optimistic value.
            self.items.update_if(|items| {
                match items.iter_mut().find(|item| *item == updated) {
                    Some(slot) => {
                        *slot = previous;
                        true
                    },
                    None => false,
                }
            });
        }
        Err(e.into())
    }

    /// Removes every item with `id`, returning the first one and its index.
    fn apply_delete(&self, id: &str) -> Option<(usize, TodoRecord)> {
        let mut removed = None;
        self.items.update_if(|items| {
            let Some(index) = items.iter().position(|item| item.id == id) else {
                return false;
            };
            removed = Some((index, items[index].clone()));
            items.retain(|item| item.id != id);
            true
        });
        removed
    }

    fn settle_delete(
        &self,
        outcome: std::result::Result<(), StoreError>,
        id: &str,
        removed: Option<(usize, TodoRecord)>,
    ) -> Result<()> {
        let Err(e) = outcome else {
            return Ok(());
        };
        tracing::warn!(todo_id = id, error = %e, "delete not persisted");
        if let (true, Some((index, record))) = (self.config.rollback_on_failure, removed) {
            self.items.update_if(|items| {
                if items.iter().any(|item| item.id == record.id) {
                    return false;
                }
                let index = index.min(items.len());
                items.insert(index, record);
                true
            });
        }
        Err(e.into())
    }
}

/// In-memory task list for one owner, kept consistent with the store.
///
/// Cloning is cheap and yields a handle to the same list.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use todolist::list::TodoListCoordinator;
/// use todolist_store::store::memory::InMemoryTodoStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(InMemoryTodoStore::new());
/// let list = TodoListCoordinator::new(store, Some("uid-1".to_string()));
///
/// list.create("Call mom", None).await.unwrap();
/// assert!(list.items().get().is_empty()); // create is not optimistic
///
/// list.reload().await.unwrap();
/// let items = list.items().get();
/// assert_eq!(items.len(), 1);
///
/// list.toggle_completed(&items[0], true).await.unwrap();
/// assert!(list.items().get()[0].completed);
/// # });
/// ```
#[derive(Clone)]
pub struct TodoListCoordinator {
    inner: Arc<ListInner>,
}

impl TodoListCoordinator {
    /// Creates a coordinator for `owner_id` with default behavior.
    ///
    /// `owner_id` is the current identity at construction time; `None`
    /// means nobody is signed in, and every operation that needs an owner
    /// fails with [`ValidationError::NotSignedIn`].
    pub fn new(store: Arc<dyn TodoStore>, owner_id: Option<String>) -> Self {
        Self::with_config(store, owner_id, ListConfig::default())
    }

    /// Creates a coordinator with explicit behavior switches.
    pub fn with_config(
        store: Arc<dyn TodoStore>,
        owner_id: Option<String>,
        config: ListConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ListInner {
                store,
                owner_id,
                config,
                items: ViewState::new(Vec::new()),
            }),
        }
    }

    /// The observable task list. Read-only outside this coordinator.
    pub fn items(&self) -> &ViewState<Vec<TodoRecord>> {
        &self.inner.items
    }

    /// The owner this list is scoped to.
    pub fn owner_id(&self) -> Option<&str> {
        self.inner.owner_id.as_deref()
    }

    /// Replaces `items` with the owner's tasks from the store.
    ///
    /// # Errors
    ///
    /// Returns the store failure; `items` are left unchanged in that case.
    /// Returns [`ValidationError::NotSignedIn`] without calling the store
    /// when there is no owner.
    pub async fn reload(&self) -> Result<()> {
        let owner = self.inner.owner()?;
        let outcome = self.inner.store.list_by_owner(owner).await;
        self.inner.settle_reload(outcome)
    }

    /// Re-synchronizes after the list screen becomes active again.
    ///
    /// Screens call this whenever they return to the foreground, for
    /// example after the edit screen pops. The coordinator does not poll.
    ///
    /// # Errors
    ///
    /// Same as [`reload`](Self::reload).
    pub async fn on_resume(&self) -> Result<()> {
        self.reload().await
    }

    /// Persists a new task for the owner.
    ///
    /// The title is trimmed; a blank description is stored as absent.
    /// `items` is not touched.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyTitle`] / [`ValidationError::NotSignedIn`]
    ///   without any store call.
    /// - [`StoreError`] when the write fails.
    pub async fn create(&self, title: &str, description: Option<&str>) -> Result<TodoRecord> {
        let title = validate_title(title)?;
        let owner = self.inner.owner()?;
        let record = TodoRecord::new(owner, title, normalize_description(description));
        let stored = self.inner.store.create(record).await?;
        tracing::debug!(todo_id = %stored.id, "task created");
        Ok(stored)
    }

    /// Overwrites `todo` with a new title and description.
    ///
    /// `id`, `completed` and `owner_id` are carried over from `todo`.
    /// `items` is not touched.
    ///
    /// # Errors
    ///
    /// Same validation as [`create`](Self::create), then any [`StoreError`].
    pub async fn update(
        &self,
        todo: &TodoRecord,
        title: &str,
        description: Option<&str>,
    ) -> Result<TodoRecord> {
        let title = validate_title(title)?;
        self.inner.owner()?;
        let record = todo.edited(title, normalize_description(description));
        self.inner.store.update(record.clone()).await?;
        tracing::debug!(todo_id = %record.id, "task updated");
        Ok(record)
    }

    /// Sets the completion flag, updating `items` before the store call.
    ///
    /// # Errors
    ///
    /// Returns the store failure. The local change is kept unless
    /// [`ListConfig::rollback_on_failure`] is set.
    pub async fn toggle_completed(&self, todo: &TodoRecord, completed: bool) -> Result<()> {
        let updated = todo.with_completed(completed);
        let previous = self.inner.apply_toggle(&updated);
        let outcome = self.inner.store.update(updated.clone()).await;
        self.inner.settle_toggle(outcome, &updated, previous)
    }

    /// Removes a task, updating `items` before the store call.
    ///
    /// # Errors
    ///
    /// Returns the store failure. The local removal is kept unless
    /// [`ListConfig::rollback_on_failure`] is set.
    pub async fn delete(&self, todo: &TodoRecord) -> Result<()> {
        let removed = self.inner.apply_delete(&todo.id);
        let outcome = self.inner.store.delete(&todo.id).await;
        self.inner.settle_delete(outcome, &todo.id, removed)
    }

    /// Runs `action` without waiting for the store.
    ///
    /// Optimistic changes are visible in `items` when this returns. The
    /// store call runs on a spawned task; its failures are logged and not
    /// surfaced. Must be called from within a Tokio runtime.
    pub fn dispatch(&self, action: ListAction) -> JoinHandle<()> {
        let store = self.inner.store.clone();
        let weak = Arc::downgrade(&self.inner);

        match action {
            ListAction::Reload => {
                let owner = match self.inner.owner() {
                    Ok(owner) => owner.to_string(),
                    Err(e) => {
                        tracing::warn!(error = %e, "reload skipped");
                        return tokio::spawn(async {});
                    },
                };
                tokio::spawn(async move {
                    let outcome = store.list_by_owner(&owner).await;
                    with_live(&weak, "reload", |inner| {
                        let _ = inner.settle_reload(outcome);
                    });
                })
            },
            ListAction::Toggle { todo, completed } => {
                let updated = todo.with_completed(completed);
                let previous = self.inner.apply_toggle(&updated);
                tokio::spawn(async move {
                    let outcome = store.update(updated.clone()).await;
                    with_live(&weak, "toggle", |inner| {
                        let _ = inner.settle_toggle(outcome, &updated, previous);
                    });
                })
            },
            ListAction::Delete(todo) => {
                let removed = self.inner.apply_delete(&todo.id);
                tokio::spawn(async move {
                    let outcome = store.delete(&todo.id).await;
                    with_live(&weak, "delete", |inner| {
                        let _ = inner.settle_delete(outcome, &todo.id, removed);
                    });
                })
            },
        }
    }
}

/// Runs `settle` if the coordinator still exists; otherwise drops the completion.
fn with_live(weak: &Weak<ListInner>, operation: &str, settle: impl FnOnce(&ListInner)) {
    match weak.upgrade() {
        Some(inner) => settle(&inner),
        None => tracing::debug!(operation, "coordinator dropped; completion discarded"),
    }
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolist_store::store::memory::InMemoryTodoStore;

    fn coordinator(owner: Option<&str>) -> TodoListCoordinator {
        TodoListCoordinator::new(
            Arc::new(InMemoryTodoStore::new()),
            owner.map(str::to_string),
        )
    }

    fn item(id: &str, completed: bool) -> TodoRecord {
        TodoRecord::new("uid", id, None)
            .with_id(id)
            .with_completed(completed)
    }

    #[test]
    fn apply_toggle_replaces_only_matching_item() {
        let list = coordinator(Some("uid"));
        list.inner.items.set(vec![item("a", false), item("b", false)]);

        let previous = list.inner.apply_toggle(&item("a", true));
        assert_eq!(previous, Some(item("a", false)));
        assert_eq!(list.items().get(), vec![item("a", true), item("b", false)]);
    }

    #[test]
    fn apply_toggle_unknown_id_leaves_items() {
        let list = coordinator(Some("uid"));
        list.inner.items.set(vec![item("a", false)]);
        assert!(list.inner.apply_toggle(&item("zzz", true)).is_none());
        assert_eq!(list.items().get(), vec![item("a", false)]);
    }

    #[test]
    fn apply_delete_reports_position() {
        let list = coordinator(Some("uid"));
        list.inner
            .items
            .set(vec![item("a", false), item("b", false), item("c", false)]);
        let removed = list.inner.apply_delete("b");
        assert_eq!(removed, Some((1, item("b", false))));
        assert_eq!(list.items().get(), vec![item("a", false), item("c", false)]);
    }

    #[test]
    fn settle_delete_rollback_restores_position() {
        let list = TodoListCoordinator::with_config(
            Arc::new(InMemoryTodoStore::new()),
            Some("uid".to_string()),
            ListConfig::default().with_rollback_on_failure(true),
        );
        list.inner
            .items
            .set(vec![item("a", false), item("b", false), item("c", false)]);
        let removed = list.inner.apply_delete("b");
        let outcome = Err(StoreError::Backend("offline".to_string()));
        assert!(list.inner.settle_delete(outcome, "b", removed).is_err());
        assert_eq!(
            list.items().get(),
            vec![item("a", false), item("b", false), item("c", false)]
        );
    }

    #[test]
    fn settle_toggle_rollback_skips_superseded_value() {
        let list = TodoListCoordinator::with_config(
            Arc::new(InMemoryTodoStore::new()),
            Some("uid".to_string()),
            ListConfig::default().with_rollback_on_failure(true),
        );
        list.inner.items.set(vec![item("a", false)]);
        let previous = list.inner.apply_toggle(&item("a", true));
        // A newer write lands before the first one fails.
        list.inner.apply_toggle(&item("a", false).edited("renamed", None));

        let outcome = Err(StoreError::Backend("offline".to_string()));
        let _ = list.inner.settle_toggle(outcome, &item("a", true), previous);
        assert_eq!(list.items().get()[0].title, "renamed");
    }

    #[test]
    fn normalize_description_drops_blank() {
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some("   ")), None);
        assert_eq!(
            normalize_description(Some(" note ")),
            Some("note".to_string())
        );
    }

    #[tokio::test]
    async fn reload_without_owner_is_validation_error() {
        let list = coordinator(None);
        let err = list.reload().await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn empty_owner_counts_as_signed_out() {
        let list = coordinator(Some(""));
        assert!(list.create("title", None).await.unwrap_err().is_validation());
    }
}
