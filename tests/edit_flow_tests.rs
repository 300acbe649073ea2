//! Integration tests for the add / edit flow wired through TodoApp.

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use todolist::app::TodoApp;
use todolist::auth::{CredentialGateway, InMemoryCredentials};
use todolist::edit::{EditAction, EditCoordinator, EditEvent};
use todolist_store::store::memory::InMemoryTodoStore;
use todolist_store::{StoreError, TodoRecord, TodoStore};

async fn signed_in_app() -> (TodoApp, String) {
    let credentials = Arc::new(InMemoryCredentials::new());
    credentials.sign_up("me@example.com", "Passw0rd!").await.unwrap();
    let uid = credentials.current_identity().unwrap();
    let app = TodoApp::new(Arc::new(InMemoryTodoStore::new()), credentials);
    (app, uid)
}

async fn type_and_save(edit: &EditCoordinator, title: &str, description: &str) {
    edit.on_event(EditAction::TitleChanged(title.to_string()))
        .await;
    edit.on_event(EditAction::DescriptionChanged(description.to_string()))
        .await;
    edit.on_event(EditAction::Save).await;
}

#[tokio::test]
async fn test_new_task_is_created_for_current_user() {
    let (app, uid) = signed_in_app().await;
    let edit = app.edit_coordinator(None);
    let mut events = edit.take_events().unwrap();

    type_and_save(&edit, "Book flights", "before May").await;
    assert_eq!(events.recv().await, Some(EditEvent::PopBack));

    let stored = app.store().list_by_owner(&uid).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Book flights");
    assert_eq!(stored[0].description.as_deref(), Some("before May"));
    assert!(!stored[0].completed);
}

#[tokio::test]
async fn test_edit_loads_and_preserves_completed_and_owner() {
    let (app, uid) = signed_in_app().await;
    let original = app
        .store()
        .create(TodoRecord::new(uid.clone(), "Draft", None))
        .await
        .unwrap();
    app.store()
        .update(original.with_completed(true))
        .await
        .unwrap();

    let edit = app.edit_coordinator(Some(original.id.clone()));
    let mut events = edit.take_events().unwrap();
    edit.load().await;
    assert_eq!(edit.title().get(), "Draft");
    assert_eq!(edit.description().get(), "");

    type_and_save(&edit, "Final", "").await;
    assert_eq!(events.recv().await, Some(EditEvent::PopBack));

    let stored = app.store().get_by_id(&original.id).await.unwrap().unwrap();
    assert_eq!(
        stored,
        TodoRecord::new(uid, "Final", None)
            .with_id(original.id)
            .with_completed(true)
    );
}

#[tokio::test]
async fn test_list_sees_edit_after_resume() {
    let (app, _) = signed_in_app().await;
    let list = app.list_coordinator();
    let created = list.create("Old title", None).await.unwrap();
    list.reload().await.unwrap();

    let edit = app.edit_coordinator(Some(created.id.clone()));
    edit.load().await;
    type_and_save(&edit, "New title", "").await;
    assert_eq!(list.items().get()[0].title, "Old title");

    list.on_resume().await.unwrap();
    assert_eq!(list.items().get()[0].title, "New title");
}

struct RejectingStore;

#[async_trait]
impl TodoStore for RejectingStore {
    async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<TodoRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn create(&self, _todo: TodoRecord) -> Result<TodoRecord, StoreError> {
        Err(StoreError::Backend("quota exceeded".to_string()))
    }

    async fn update(&self, _todo: TodoRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("quota exceeded".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<TodoRecord>, StoreError> {
        Err(StoreError::Backend("unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_store_failure_shows_message_and_stays() {
    let edit = EditCoordinator::new(Arc::new(RejectingStore), Some("uid".to_string()), None);
    let mut events = edit.take_events().unwrap();

    type_and_save(&edit, "Title", "").await;
    assert_eq!(
        events.recv().await,
        Some(EditEvent::ShowMessage("could not save: quota exceeded".to_string()))
    );
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_failed_load_leaves_fields_empty_and_save_updates_in_place() {
    let edit = EditCoordinator::new(
        Arc::new(RejectingStore),
        Some("uid".to_string()),
        Some("doc-9".to_string()),
    );
    let mut events = edit.take_events().unwrap();
    edit.load().await;
    assert_eq!(edit.title().get(), "");
    assert!(edit.is_editing());

    type_and_save(&edit, "Retry", "").await;
    assert_eq!(
        events.recv().await,
        Some(EditEvent::ShowMessage("could not save: quota exceeded".to_string()))
    );
}
