//! State holder behind the login and sign-up screens.
//!
//! [`AuthFlow`] validates input locally, calls the [`CredentialGateway`],
//! and reports the outcome in two ways:
//!
//! - field errors (`email_error`, `password_error`) and `is_loading` as
//!   observable [`ViewState`]s, for rendering under the inputs;
//! - one-shot [`AuthEvent`]s for the screen to navigate or show a message.
//!
//! Field validation failures never reach the provider and never produce an
//! event; they only set the matching field error.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::CredentialGateway;
use crate::error::{Error, Result, ValidationError};
use crate::state::{EventChannel, ViewState};
use crate::validation::{validate_email, validate_password};

/// Outcome of a sign-in or sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// The provider accepted the credentials; a user is now signed in.
    Success,
    /// The provider rejected the request with this diagnostic.
    Error(String),
}

struct AuthInner {
    gateway: Arc<dyn CredentialGateway>,
    is_loading: ViewState<bool>,
    email_error: ViewState<Option<String>>,
    password_error: ViewState<Option<String>>,
    events: EventChannel<AuthEvent>,
}

/// Login / sign-up state holder.
///
/// Cloning is cheap and yields a handle to the same state.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use todolist::auth::{AuthEvent, AuthFlow, InMemoryCredentials};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let flow = AuthFlow::new(Arc::new(InMemoryCredentials::new()));
/// let mut events = flow.take_events().unwrap();
///
/// flow.sign_up("new@example.com", "Passw0rd!").await.unwrap();
/// assert_eq!(events.recv().await, Some(AuthEvent::Success));
/// assert!(!flow.is_loading().get());
/// # });
/// ```
#[derive(Clone)]
pub struct AuthFlow {
    inner: Arc<AuthInner>,
}

impl AuthFlow {
    /// Creates a flow over the given credential gateway.
    pub fn new(gateway: Arc<dyn CredentialGateway>) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                gateway,
                is_loading: ViewState::new(false),
                email_error: ViewState::new(None),
                password_error: ViewState::new(None),
                events: EventChannel::new(),
            }),
        }
    }

    /// Whether a provider call is in flight.
    pub fn is_loading(&self) -> &ViewState<bool> {
        &self.inner.is_loading
    }

    /// Message to show under the email field.
    pub fn email_error(&self) -> &ViewState<Option<String>> {
        &self.inner.email_error
    }

    /// Message to show under the password field.
    pub fn password_error(&self) -> &ViewState<Option<String>> {
        &self.inner.password_error
    }

    /// Takes the one-shot event receiver. Only the first call returns `Some`.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<AuthEvent>> {
        self.inner.events.take_receiver()
    }

    /// Clears the email error as the user types.
    pub fn on_email_change(&self, _email: &str) {
        self.inner.email_error.set(None);
    }

    /// Clears the password error as the user types.
    pub fn on_password_change(&self, _password: &str) {
        self.inner.password_error.set(None);
    }

    /// Signs in with `email` and `password`.
    ///
    /// Only the email format is checked locally; password strength is a
    /// sign-up rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the email is rejected (and sets
    /// `email_error`), or [`Error::Auth`] when the provider rejects the
    /// credentials (and emits [`AuthEvent::Error`]).
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.check_email(email)?;

        let gateway = self.inner.gateway.clone();
        let (email, password) = (email.trim().to_string(), password.trim().to_string());
        self.submit(async move { gateway.sign_in(&email, &password).await })
            .await
    }

    /// Registers a new account with `email` and `password`.
    ///
    /// The email is checked first, then password strength.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a field is rejected (and sets the
    /// matching field error), or [`Error::Auth`] when the provider rejects
    /// the request (and emits [`AuthEvent::Error`]).
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        self.check_email(email)?;
        if let Err(e) = validate_password(password) {
            self.inner.password_error.set(Some(e.to_string()));
            return Err(e.into());
        }

        let gateway = self.inner.gateway.clone();
        let (email, password) = (email.trim().to_string(), password.trim().to_string());
        self.submit(async move { gateway.sign_up(&email, &password).await })
            .await
    }

    fn check_email(&self, email: &str) -> std::result::Result<(), ValidationError> {
        validate_email(email).inspect_err(|e| self.inner.email_error.set(Some(e.to_string())))
    }

    async fn submit<F>(&self, call: F) -> Result<()>
    where
        F: std::future::Future<Output = std::result::Result<(), crate::error::AuthError>>,
    {
        self.inner.is_loading.set(true);
        let outcome = call.await;
        self.inner.is_loading.set(false);

        match outcome {
            Ok(()) => {
                self.inner.events.emit(AuthEvent::Success);
                Ok(())
            },
            Err(e) => {
                tracing::warn!(error = %e, "authentication rejected");
                self.inner.events.emit(AuthEvent::Error(e.to_string()));
                Err(Error::Auth(e))
            },
        }
    }
}
