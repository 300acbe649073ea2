//! Task records and the owner-scoped document store behind them.
//!
//! This crate holds the persisted half of todolist: the [`TodoRecord`] data
//! model and the [`TodoStore`](store::TodoStore) gateway through which every
//! read and write reaches the backing document database.
//!
//! # Module Organization
//!
//! - [`domain`] - The [`TodoRecord`] model and its wire layout
//! - [`store`] - Gateway trait, generic store, KV backend trait, in-memory backend
//! - [`error`] - [`StoreError`], the failure type of every gateway call

pub mod domain;
pub mod error;
pub mod store;

// Re-exports for ergonomic access
pub use domain::TodoRecord;
pub use error::StoreError;
pub use store::{StoreConfig, TodoStore};
