//! Credential gateway and the sign-in / sign-up flow.
//!
//! Application code never talks to an authentication provider directly. It
//! sees a [`CredentialGateway`]: four operations and a single "current
//! identity" slot. Coordinators receive that identity explicitly when they
//! are constructed instead of reading it from a global.
//!
//! - [`CredentialGateway`] - provider-agnostic trait
//! - [`InMemoryCredentials`] - reference provider for tests and local runs
//! - [`AuthFlow`] - state holder behind the login and sign-up screens

pub mod flow;
pub mod memory;

use async_trait::async_trait;

use crate::error::AuthError;

pub use flow::{AuthEvent, AuthFlow};
pub use memory::InMemoryCredentials;

/// Gateway to the external authentication provider.
///
/// Implementations forward to the provider; they do not re-implement the
/// client-side syntactic checks in [`crate::validation`].
#[async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Verifies credentials and, on success, makes that user current.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] with the provider's diagnostic on rejection.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Registers a new account and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] with the provider's diagnostic on rejection.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Clears the current identity. Always succeeds locally.
    fn sign_out(&self);

    /// Identifier of the signed-in user, or `None` when signed out.
    fn current_identity(&self) -> Option<String>;
}
