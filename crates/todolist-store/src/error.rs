//! Error type for gateway operations.
//!
//! Every [`TodoStore`](crate::store::TodoStore) call resolves to
//! `Result<_, StoreError>`. Failures always carry a human-readable
//! diagnostic from the underlying provider; there is no separate
//! "not found" kind because the gateway contract never checks existence.

use thiserror::Error;

/// Errors returned by the task store gateway.
///
/// # Examples
///
/// ```
/// use todolist_store::StoreError;
///
/// let err = StoreError::Backend("deadline exceeded".to_string());
/// assert_eq!(err.to_string(), "store error: deadline exceeded");
/// assert_eq!(err.diagnostic(), "deadline exceeded");
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update was issued for a record that was never persisted.
    #[error("record has no id; create it before updating")]
    MissingId,

    /// A record could not be encoded or decoded at the storage boundary.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend rejected or failed the call (network, quota, timeout).
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns the provider diagnostic without the error-kind prefix.
    ///
    /// This is the string the presentation layer shows to the user.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::MissingId => "record has no id".to_string(),
            Self::Serialization(msg) | Self::Backend(msg) => msg.clone(),
        }
    }
}
