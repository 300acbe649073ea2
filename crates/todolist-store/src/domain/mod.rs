//! Domain types for persisted to-do items.
//!
//! [`TodoRecord`] is both the in-memory representation handed to the
//! presentation layer and the document stored in the `todos` collection.

pub mod record;

pub use record::*;
