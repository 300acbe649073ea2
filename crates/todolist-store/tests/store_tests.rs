//! Integration tests for InMemoryTodoStore.
//!
//! Tests cover the gateway contract (assign-on-insert, full overwrite,
//! idempotent delete, optional get), owner scoping, and concurrent access.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use todolist_store::store::memory::InMemoryTodoStore;
use todolist_store::store::TodoStore;
use todolist_store::{StoreError, TodoRecord};

// ─── Gateway Contract Tests ─────────────────────────────────────────────────

mod contract_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = InMemoryTodoStore::new();
        let transient = TodoRecord::new("uid-1", "Buy bread", Some("rye".to_string()));
        let stored = store.create(transient.clone()).await.unwrap();

        let fetched = store.get_by_id(&stored.id).await.unwrap().unwrap();
        assert!(!fetched.id.is_empty());
        assert_eq!(fetched.title, transient.title);
        assert_eq!(fetched.description, transient.description);
        assert_eq!(fetched.completed, transient.completed);
        assert_eq!(fetched.owner_id, transient.owner_id);
        assert_eq!(fetched, transient.with_id(stored.id.clone()));
    }

    #[tokio::test]
    async fn test_create_assigns_uuid_v4_id() {
        let store = InMemoryTodoStore::new();
        let stored = store
            .create(TodoRecord::new("uid-1", "t", None))
            .await
            .unwrap();
        let parsed = uuid::Uuid::parse_str(&stored.id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let store = InMemoryTodoStore::new();
        let result = store.update(TodoRecord::new("uid-1", "t", None)).await;
        assert!(matches!(result, Err(StoreError::MissingId)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryTodoStore::new();
        let stored = store
            .create(TodoRecord::new("uid-1", "t", None))
            .await
            .unwrap();
        store.delete(&stored.id).await.unwrap();
        store.delete(&stored.id).await.unwrap();
        assert_eq!(store.get_by_id(&stored.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_by_owner_scopes_results() {
        let store = InMemoryTodoStore::new();
        for title in ["a", "b", "c"] {
            store
                .create(TodoRecord::new("alice", title, None))
                .await
                .unwrap();
        }
        store
            .create(TodoRecord::new("bob", "d", None))
            .await
            .unwrap();

        let alice = store.list_by_owner("alice").await.unwrap();
        assert_eq!(alice.len(), 3);
        assert!(alice.iter().all(|r| r.owner_id == "alice"));
        assert!(store.list_by_owner("carol").await.unwrap().is_empty());
    }
}

// ─── Concurrency Tests ──────────────────────────────────────────────────────

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_creates_mint_distinct_ids() {
        let store = Arc::new(InMemoryTodoStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(TodoRecord::new("uid", format!("task {i}"), None))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let ids: HashSet<String> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(ids.len(), 32);
        assert_eq!(store.list_by_owner("uid").await.unwrap().len(), 32);
    }
}

// ─── Property Tests ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_round_trip_preserves_all_fields_but_id(
        owner in "[a-zA-Z0-9]{1,28}",
        title in "\\PC{1,40}",
        description in proptest::option::of("\\PC{0,80}"),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = InMemoryTodoStore::new();
            let transient = TodoRecord::new(owner.clone(), title.clone(), description.clone());
            let stored = store.create(transient.clone()).await.unwrap();
            let fetched = store.get_by_id(&stored.id).await.unwrap().unwrap();
            prop_assert!(!fetched.id.is_empty());
            prop_assert_eq!(fetched, transient.with_id(stored.id));
            Ok::<(), TestCaseError>(())
        })?;
    }
}
