//! Task record -- one to-do item as stored and displayed.
//!
//! The serialized layout matches the documents in the `todos` collection:
//! `id`, `title`, `description` (nullable), `isCompleted`, `userId`.

use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// An empty [`id`](Self::id) means the record is transient: it has not been
/// persisted yet and the store will mint an id on first write. The
/// [`owner_id`](Self::owner_id) is set once at creation and carried
/// unchanged through every later overwrite.
///
/// # Examples
///
/// ```
/// use todolist_store::TodoRecord;
///
/// let todo = TodoRecord::new("uid-1", "Buy milk", None);
/// assert!(!todo.is_persisted());
/// assert!(!todo.completed);
/// assert_eq!(todo.owner_id, "uid-1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoRecord {
    /// Document id. Empty until the store assigns one.
    pub id: String,

    /// Display title. Validated non-blank before it reaches the store.
    pub title: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Completion flag.
    #[serde(rename = "isCompleted", alias = "completed")]
    pub completed: bool,

    /// Identity of the user who created the record.
    #[serde(rename = "userId", alias = "ownerId")]
    pub owner_id: String,
}

impl TodoRecord {
    /// Creates a transient, not-yet-completed record owned by `owner_id`.
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            description,
            completed: false,
            owner_id: owner_id.into(),
        }
    }

    /// Returns `true` once the store has assigned an id.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }

    /// Returns a copy carrying the given id.
    ///
    /// # Examples
    ///
    /// ```
    /// use todolist_store::TodoRecord;
    ///
    /// let stored = TodoRecord::new("uid-1", "Walk dog", None).with_id("doc-7");
    /// assert!(stored.is_persisted());
    /// assert_eq!(stored.id, "doc-7");
    /// ```
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns a copy with the completion flag set to `completed`.
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    /// Builds the full replacement record for an edit.
    ///
    /// `id`, `completed` and `owner_id` are preserved; only the
    /// user-editable fields change.
    ///
    /// # Examples
    ///
    /// ```
    /// use todolist_store::TodoRecord;
    ///
    /// let stored = TodoRecord::new("uid-1", "Draft", None)
    ///     .with_id("doc-1")
    ///     .with_completed(true);
    /// let edited = stored.edited("Final", Some("ship it".to_string()));
    /// assert_eq!(edited.id, "doc-1");
    /// assert!(edited.completed);
    /// assert_eq!(edited.owner_id, "uid-1");
    /// assert_eq!(edited.title, "Final");
    /// ```
    pub fn edited(&self, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: self.id.clone(),
            title: title.into(),
            description,
            completed: self.completed,
            owner_id: self.owner_id.clone(),
        }
    }
}
