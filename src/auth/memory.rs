//! In-memory credential provider for development and testing.
//!
//! Accounts live in a `DashMap` keyed by lower-cased email. Passwords are
//! kept only as SHA-256 digests salted with the account's uid. A successful
//! sign-up signs the new user in, as hosted providers do.
//!
//! # Example
//!
//! ```rust
//! use todolist::auth::{CredentialGateway, InMemoryCredentials};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let credentials = InMemoryCredentials::new();
//! credentials.sign_up("dev@example.com", "Passw0rd!").await.unwrap();
//! assert!(credentials.current_identity().is_some());
//!
//! credentials.sign_out();
//! assert!(credentials.current_identity().is_none());
//! # });
//! ```

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::CredentialGateway;
use crate::error::AuthError;

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    digest: Vec<u8>,
}

/// Credential provider that keeps accounts in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    accounts: DashMap<String, Account>,
    current: RwLock<Option<String>>,
}

impl InMemoryCredentials {
    /// Creates a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers an account without signing it in.
    ///
    /// Returns the provider with the account added; an existing account for
    /// the same email is replaced.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        let uid = Uuid::new_v4().to_string();
        let digest = Self::digest(&uid, password);
        self.accounts
            .insert(Self::normalize(email), Account { uid, digest });
        self
    }

    /// Returns the uid registered for `email`, if any.
    pub fn uid_for(&self, email: &str) -> Option<String> {
        self.accounts
            .get(&Self::normalize(email))
            .map(|account| account.uid.clone())
    }

    fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn digest(uid: &str, password: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(uid.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        hasher.finalize().to_vec()
    }
}

#[async_trait]
impl CredentialGateway for InMemoryCredentials {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let key = Self::normalize(email);
        let account = self
            .accounts
            .get(&key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AuthError::UnknownAccount { email: key.clone() })?;

        if Self::digest(&account.uid, password) != account.digest {
            tracing::debug!(email = %key, "sign-in rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        *self.current.write() = Some(account.uid.clone());
        tracing::info!(uid = %account.uid, "signed in");
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let key = Self::normalize(email);
        let uid = match self.accounts.entry(key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(AuthError::EmailInUse { email: key });
            },
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let uid = Uuid::new_v4().to_string();
                let digest = Self::digest(&uid, password);
                slot.insert(Account {
                    uid: uid.clone(),
                    digest,
                });
                uid
            },
        };

        *self.current.write() = Some(uid.clone());
        tracing::info!(uid = %uid, "account created and signed in");
        Ok(())
    }

    fn sign_out(&self) {
        if let Some(uid) = self.current.write().take() {
            tracing::info!(uid = %uid, "signed out");
        }
    }

    fn current_identity(&self) -> Option<String> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let credentials = InMemoryCredentials::new();
        credentials.sign_up("A@B.com", "Secret1!").await.unwrap();
        let uid = credentials.current_identity().unwrap();
        assert_eq!(credentials.uid_for("a@b.com"), Some(uid.clone()));

        credentials.sign_out();
        assert!(credentials.current_identity().is_none());

        credentials.sign_in("a@b.com", "Secret1!").await.unwrap();
        assert_eq!(credentials.current_identity(), Some(uid));
    }

    #[tokio::test]
    async fn sign_up_rejects_duplicate_email() {
        let credentials = InMemoryCredentials::new().with_account("taken@x.io", "Secret1!");
        let err = credentials
            .sign_up(" Taken@X.io ", "Other1!!")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::EmailInUse {
                email: "taken@x.io".to_string()
            }
        );
        assert!(credentials.current_identity().is_none());
    }

    #[tokio::test]
    async fn sign_in_wrong_password_keeps_session_empty() {
        let credentials = InMemoryCredentials::new().with_account("u@x.io", "Right1!!");
        let err = credentials.sign_in("u@x.io", "Wrong1!!").await.unwrap_err();
        assert_eq!(err, AuthError::WrongPassword);
        assert!(credentials.current_identity().is_none());
    }

    #[tokio::test]
    async fn sign_in_unknown_account() {
        let credentials = InMemoryCredentials::new();
        let err = credentials.sign_in("ghost@x.io", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::UnknownAccount { .. }));
    }

    #[test]
    fn sign_out_when_signed_out_is_noop() {
        let credentials = InMemoryCredentials::new();
        credentials.sign_out();
        assert!(credentials.current_identity().is_none());
    }

    #[test]
    fn digests_differ_per_account() {
        assert_ne!(
            InMemoryCredentials::digest("uid-a", "same"),
            InMemoryCredentials::digest("uid-b", "same")
        );
    }
}
