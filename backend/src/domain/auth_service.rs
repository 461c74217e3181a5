//! Credential authentication flow.
//!
//! Order is fixed: look the user up by email, run the password verifier,
//! then hand the authenticated record to the token issuer. The two failure
//! paths (unknown email, wrong password) produce byte-identical errors so a
//! caller cannot enumerate accounts, and the unknown-email path burns one
//! hash verification to keep the timing envelopes aligned as far as
//! practical.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use super::auth::LoginCredentials;
use super::error::Error;
use super::password;
use super::ports::{UserPersistenceError, UserRepository};
use super::token::{SessionToken, TokenIssuer};
use super::user::User;

/// Message shared verbatim by every credential failure.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Successful authentication result: the resolved user and a fresh token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The resolved user record.
    pub user: User,
    /// Signed session token for subsequent requests.
    pub token: SessionToken,
}

/// Driving port for credential authentication.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate credentials, returning the user and a session token.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS)
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } | UserPersistenceError::DuplicateEmail { email: message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Credential authentication backed by the user repository.
#[derive(Clone)]
pub struct CredentialAuthService {
    users: Arc<dyn UserRepository>,
    issuer: TokenIssuer,
}

impl CredentialAuthService {
    /// Create a service over the credential store and token issuer.
    pub fn new(users: Arc<dyn UserRepository>, issuer: TokenIssuer) -> Self {
        Self { users, issuer }
    }
}

#[async_trait]
impl AuthService for CredentialAuthService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(user) = user else {
            password::burn_verification(credentials.password());
            return Err(invalid_credentials());
        };

        if !password::verify(user.password_hash(), credentials.password()) {
            return Err(invalid_credentials());
        }

        let token = self.issuer.issue(&user).map_err(|err| {
            error!(error = %err, "session token signing failed");
            Error::internal("could not establish a session")
        })?;

        Ok(AuthenticatedUser { user, token })
    }
}
