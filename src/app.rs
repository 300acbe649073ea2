//! Composition root.
//!
//! [`TodoApp`] holds the two gateways and hands out coordinators with their
//! collaborators injected. Each coordinator captures the identity that is
//! current when it is built; after signing in or out, build a new one.

use std::sync::Arc;

use todolist_store::store::memory::InMemoryTodoStore;
use todolist_store::TodoStore;

use crate::auth::{AuthFlow, CredentialGateway, InMemoryCredentials};
use crate::config::AppConfig;
use crate::edit::EditCoordinator;
use crate::list::{ListAction, ListConfig, TodoListCoordinator};

/// Wires gateways into coordinators.
///
/// # Example
///
/// ```rust
/// use todolist::app::TodoApp;
/// use todolist::auth::CredentialGateway;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let app = TodoApp::in_memory();
/// app.auth_flow().sign_up("me@example.com", "Passw0rd!").await.unwrap();
///
/// let list = app.list_coordinator();
/// list.create("Write report", Some("due Friday")).await.unwrap();
/// list.reload().await.unwrap();
/// assert_eq!(list.items().get().len(), 1);
///
/// app.logout();
/// assert!(app.credentials().current_identity().is_none());
/// # });
/// ```
#[derive(Clone)]
pub struct TodoApp {
    store: Arc<dyn TodoStore>,
    credentials: Arc<dyn CredentialGateway>,
    list_config: ListConfig,
}

impl TodoApp {
    /// Creates an app over the given gateways.
    pub fn new(store: Arc<dyn TodoStore>, credentials: Arc<dyn CredentialGateway>) -> Self {
        Self {
            store,
            credentials,
            list_config: ListConfig::default(),
        }
    }

    /// Creates an app backed entirely by in-process gateways.
    pub fn in_memory() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Creates an in-memory app using the store and list settings in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let store = InMemoryTodoStore::new().with_config(config.store_config());
        Self::new(Arc::new(store), Arc::new(InMemoryCredentials::new()))
            .with_list_config(config.list.clone())
    }

    /// Sets the behavior of list coordinators built afterwards.
    pub fn with_list_config(mut self, config: ListConfig) -> Self {
        self.list_config = config;
        self
    }

    /// The task store gateway.
    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.store
    }

    /// The credential gateway.
    pub fn credentials(&self) -> &Arc<dyn CredentialGateway> {
        &self.credentials
    }

    /// State for the login and sign-up screens.
    pub fn auth_flow(&self) -> AuthFlow {
        AuthFlow::new(self.credentials.clone())
    }

    /// A list coordinator for the current identity, with empty `items`.
    pub fn list_coordinator(&self) -> TodoListCoordinator {
        TodoListCoordinator::with_config(
            self.store.clone(),
            self.credentials.current_identity(),
            self.list_config.clone(),
        )
    }

    /// A list coordinator for the current identity with its first reload
    /// already dispatched. Must be called from within a Tokio runtime.
    pub fn open_list(&self) -> TodoListCoordinator {
        let list = self.list_coordinator();
        list.dispatch(ListAction::Reload);
        list
    }

    /// State for the add / edit screen. `todo_id` is `None` for a new task.
    pub fn edit_coordinator(&self, todo_id: Option<String>) -> EditCoordinator {
        EditCoordinator::new(
            self.store.clone(),
            self.credentials.current_identity(),
            todo_id,
        )
    }

    /// Signs the current user out.
    pub fn logout(&self) {
        self.credentials.sign_out();
    }
}
