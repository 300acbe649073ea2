//! Error types for todolist operations.
//!
//! Three kinds of failure reach the presentation layer:
//!
//! - [`ValidationError`] -- client-side checks that never reach a gateway.
//! - [`StoreError`] -- a task store gateway call failed.
//! - [`AuthError`] -- the credential provider rejected a sign-in or sign-up.
//!
//! [`Error`] unifies them so coordinators can use `?` across all three.
//! None of them is fatal; every failure is recoverable by retrying the action.

use thiserror::Error;

pub use todolist_store::StoreError;

use crate::validation::{EmailIssue, PasswordRule};

/// Client-side validation failures.
///
/// # Examples
///
/// ```
/// use todolist::ValidationError;
///
/// assert_eq!(ValidationError::EmptyTitle.to_string(), "title must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// No authenticated identity is available.
    #[error("not signed in")]
    NotSignedIn,

    /// The email address is blank or malformed.
    #[error("{0}")]
    InvalidEmail(EmailIssue),

    /// The password fails a strength rule.
    #[error("{0}")]
    WeakPassword(PasswordRule),
}

/// Rejections from the credential provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No account is registered for the email address.
    #[error("no account exists for {email}")]
    UnknownAccount {
        /// The email that was looked up.
        email: String,
    },

    /// The password does not match the account.
    #[error("the password is incorrect")]
    WrongPassword,

    /// Sign-up attempted with an email that already has an account.
    #[error("the email address {email} is already in use")]
    EmailInUse {
        /// The email that is taken.
        email: String,
    },

    /// Any other provider-side failure, with the provider's diagnostic.
    #[error("{0}")]
    Provider(String),
}

/// Any failure a coordinator can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Client-side validation failed; no gateway call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The task store gateway failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The credential provider rejected the request.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Error {
    /// The message shown to the user for this failure.
    ///
    /// Validation and backend failures render the same way: as a plain
    /// message on the screen's event channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use todolist::{Error, StoreError, ValidationError};
    ///
    /// let err = Error::from(StoreError::Backend("quota exceeded".to_string()));
    /// assert_eq!(err.user_message(), "quota exceeded");
    ///
    /// let err = Error::from(ValidationError::NotSignedIn);
    /// assert_eq!(err.user_message(), "not signed in");
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(e) => e.diagnostic(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for failures detected before any gateway call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
