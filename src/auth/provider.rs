//! Sign-in collaborator.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::password;
use crate::models::text;
use crate::store::{DocumentStore, Fields, Query, StoreError, ADMINS};

/// An authenticated admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub email: String,
}

#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    Store(StoreError),
    Hash(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Store(e) => write!(f, "Store error: {e}"),
            AuthError::Hash(e) => write!(f, "Hash error: {e}"),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        AuthError::Store(e)
    }
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminSession, AuthError>;
}

/// Verifies argon2 hashes kept in the admin collection.
pub struct StoreAuthenticator {
    store: Arc<dyn DocumentStore>,
}

impl StoreAuthenticator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl Authenticator for StoreAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminSession, AuthError> {
        let email = normalize_email(email);
        let found = self
            .store
            .query(ADMINS, &Query::new().filter("email", email.as_str()).limit(1))
            .await?;
        let Some(account) = found.into_iter().next() else {
            return Err(AuthError::InvalidCredentials);
        };

        let hash = text(&account.fields, "passwordHash");
        match password::verify_password(password, &hash) {
            Ok(true) => Ok(AdminSession { email }),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(AuthError::Hash(e)),
        }
    }
}

/// Create the admin account unless one with this email exists.
/// Returns whether an account was created.
pub async fn seed_admin(
    store: &dyn DocumentStore,
    email: &str,
    password_hash: &str,
) -> Result<bool, StoreError> {
    let email = normalize_email(email);
    let existing = store
        .query(ADMINS, &Query::new().filter("email", email.as_str()).limit(1))
        .await?;
    if !existing.is_empty() {
        return Ok(false);
    }

    let mut fields = Fields::new();
    fields.insert("email".into(), Value::from(email));
    fields.insert("passwordHash".into(), Value::from(password_hash));
    store.create(ADMINS, fields).await?;
    Ok(true)
}
