//! State holder behind the add / edit task screen.
//!
//! An [`EditCoordinator`] is built per screen visit. Without a todo id it
//! creates a new record on save; with one it loads that record and
//! overwrites it on save, keeping its completion flag and owner.
//!
//! Outcomes reach the screen as one-shot [`EditEvent`]s.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use todolist_store::{TodoRecord, TodoStore};

use crate::error::{Error, ValidationError};
use crate::state::{EventChannel, ViewState};
use crate::validation::validate_title;

/// Input from the add / edit screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// The title field changed.
    TitleChanged(String),
    /// The description field changed.
    DescriptionChanged(String),
    /// Persist the current input.
    Save,
    /// Leave without saving.
    NavigateBack,
}

/// One-shot outcome for the add / edit screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Close the screen.
    PopBack,
    /// Show a transient message.
    ShowMessage(String),
}

/// Add / edit screen state.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use todolist::edit::{EditAction, EditCoordinator, EditEvent};
/// use todolist_store::store::memory::InMemoryTodoStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(InMemoryTodoStore::new());
/// let edit = EditCoordinator::new(store, Some("uid-1".to_string()), None);
/// let mut events = edit.take_events().unwrap();
///
/// edit.on_event(EditAction::TitleChanged("Buy milk".into())).await;
/// edit.on_event(EditAction::Save).await;
/// assert_eq!(events.recv().await, Some(EditEvent::PopBack));
/// # });
/// ```
pub struct EditCoordinator {
    store: Arc<dyn TodoStore>,
    owner_id: Option<String>,
    todo_id: Option<String>,
    loaded: Mutex<Option<TodoRecord>>,
    title: ViewState<String>,
    description: ViewState<String>,
    events: EventChannel<EditEvent>,
}

impl EditCoordinator {
    /// Creates the screen state. `todo_id` is `None` (or empty) for a new task.
    pub fn new(
        store: Arc<dyn TodoStore>,
        owner_id: Option<String>,
        todo_id: Option<String>,
    ) -> Self {
        Self {
            store,
            owner_id,
            todo_id: todo_id.filter(|id| !id.is_empty()),
            loaded: Mutex::new(None),
            title: ViewState::default(),
            description: ViewState::default(),
            events: EventChannel::new(),
        }
    }

    /// Current title input.
    pub fn title(&self) -> &ViewState<String> {
        &self.title
    }

    /// Current description input.
    pub fn description(&self) -> &ViewState<String> {
        &self.description
    }

    /// Whether this screen edits an existing record.
    pub fn is_editing(&self) -> bool {
        self.todo_id.is_some()
    }

    /// Takes the one-shot event receiver. Only the first call returns `Some`.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<EditEvent>> {
        self.events.take_receiver()
    }

    /// Fills the fields from the stored record when editing.
    ///
    /// A missing record or a failed read leaves the fields empty; saving
    /// afterwards still overwrites at the requested id.
    pub async fn load(&self) {
        let Some(id) = self.todo_id.as_deref() else {
            return;
        };
        match self.store.get_by_id(id).await {
            Ok(Some(record)) => {
                self.title.set(record.title.clone());
                self.description
                    .set(record.description.clone().unwrap_or_default());
                *self.loaded.lock() = Some(record);
            },
            Ok(None) => tracing::debug!(todo_id = id, "record to edit not found"),
            Err(e) => tracing::warn!(todo_id = id, error = %e, "could not load record to edit"),
        }
    }

    /// Handles one screen action.
    pub async fn on_event(&self, action: EditAction) {
        match action {
            EditAction::TitleChanged(title) => self.title.set(title),
            EditAction::DescriptionChanged(description) => self.description.set(description),
            EditAction::Save => self.save().await,
            EditAction::NavigateBack => self.events.emit(EditEvent::PopBack),
        }
    }

    async fn save(&self) {
        let event = match self.persist().await {
            Ok(()) => EditEvent::PopBack,
            Err(Error::Validation(e)) => EditEvent::ShowMessage(e.to_string()),
            Err(e) => {
                tracing::warn!(todo_id = ?self.todo_id, error = %e, "save failed");
                EditEvent::ShowMessage(format!("could not save: {}", e.user_message()))
            },
        };
        self.events.emit(event);
    }

    async fn persist(&self) -> crate::Result<()> {
        let title = self.title.get();
        let title = validate_title(&title)?;
        let owner = self
            .owner_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::NotSignedIn)?;
        let description = Some(self.description.get().trim().to_string()).filter(|d| !d.is_empty());

        match self.todo_id.as_deref() {
            None => {
                let stored = self
                    .store
                    .create(TodoRecord::new(owner, title, description))
                    .await?;
                tracing::debug!(todo_id = %stored.id, "task created");
            },
            Some(id) => {
                let base = self
                    .loaded
                    .lock()
                    .clone()
                    .unwrap_or_else(|| TodoRecord::new(owner, "", None).with_id(id));
                self.store.update(base.edited(title, description)).await?;
                tracing::debug!(todo_id = id, "task updated");
            },
        }
        Ok(())
    }
}
