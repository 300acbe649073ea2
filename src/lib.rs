//! Client-side core of a to-do application.
//!
//! Users sign in through a [`CredentialGateway`](auth::CredentialGateway)
//! and manage their own task records, which live in a document store
//! reached through the [`TodoStore`] gateway. This crate keeps the
//! in-memory task list consistent with that store under optimistic local
//! mutation, and validates input before anything is sent.
//!
//! # Module Organization
//!
//! - [`list`] - [`TodoListCoordinator`](list::TodoListCoordinator), owner of the task list
//! - [`edit`] - Add / edit screen state
//! - [`auth`] - Credential gateway, in-memory provider, login / sign-up state
//! - [`validation`] - Email, password, and title rules
//! - [`state`] - Observable values and one-shot events
//! - [`app`] - [`TodoApp`](app::TodoApp), the composition root
//! - [`config`] - TOML configuration
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```rust
//! use todolist::app::TodoApp;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let app = TodoApp::in_memory();
//! app.auth_flow().sign_up("me@example.com", "Passw0rd!").await.unwrap();
//!
//! let list = app.list_coordinator();
//! list.create("Buy milk", None).await.unwrap();
//! list.reload().await.unwrap();
//!
//! let todo = list.items().get()[0].clone();
//! list.toggle_completed(&todo, true).await.unwrap();
//! assert!(list.items().get()[0].completed);
//! # });
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod edit;
pub mod error;
pub mod list;
#[cfg(feature = "logging")]
pub mod logging;
pub mod state;
pub mod validation;

// Re-exports for ergonomic access
pub use error::{AuthError, Error, Result, StoreError, ValidationError};
pub use todolist_store::{TodoRecord, TodoStore};
