//! Stateless session tokens: issuing, validation, and the resolved identity.
//!
//! A session token is a signed, time-bounded claim set ({subject id, subject
//! email, admin capability, issued-at, expiry}) with no server-side state:
//! nothing is persisted per token and there is no revocation list. Rotating
//! the signing secret invalidates every outstanding token.
//!
//! The signing secret is loaded once at startup and injected into the issuer
//! and validator; it is never a process-global.

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::user::{Email, User};

/// Token lifetime from issue to expiry.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Minimum accepted signing secret length in bytes.
pub const SECRET_MIN_BYTES: usize = 32;

/// Clock abstraction so expiry checks are testable without waiting.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(SystemTime::now())
    }
}

/// Error raised when the configured signing secret is unusable.
///
/// Surfaced at startup; a process without a valid secret must not serve any
/// code path that issues or validates tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningSecretError {
    /// The secret was absent or shorter than [`SECRET_MIN_BYTES`].
    #[error("signing secret must be at least {SECRET_MIN_BYTES} bytes")]
    TooShort,
}

/// Process-wide token signing secret, validated once at startup.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Validate and wrap raw secret material.
    pub fn new(bytes: Vec<u8>) -> Result<Self, SigningSecretError> {
        if bytes.len() < SECRET_MIN_BYTES {
            return Err(SigningSecretError::TooShort);
        }
        Ok(Self(bytes))
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}

/// Paired HS256 keys derived from the signing secret.
///
/// Shared by the issuer and validator so both always agree on the key
/// material.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    /// Derive the key pair from a validated secret.
    pub fn from_secret(secret: &SigningSecret) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&secret.0),
            decoding: DecodingKey::from_secret(&secret.0),
        }
    }
}

/// Claim set embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject user id (canonical UUID form).
    sub: String,
    /// Subject email as stored.
    email: String,
    /// Administrative capability flag.
    admin: bool,
    /// Issue instant, seconds since the epoch.
    iat: i64,
    /// Expiration instant, seconds since the epoch.
    exp: i64,
}

/// Serialized signed token, opaque to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Borrow the serialized token.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

/// Caller identity recovered from a validated token.
///
/// Carries exactly what the claims carried; callers needing a guaranteed
/// fresh user record re-fetch by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    email: Email,
    admin: bool,
}

impl Identity {
    /// Assemble an identity from validated components.
    pub fn new(user_id: UserId, email: Email, admin: bool) -> Self {
        Self {
            user_id,
            email,
            admin,
        }
    }

    /// Subject user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Subject email as embedded in the claims.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Administrative capability flag.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

/// Failure raised when signing a token.
///
/// Signing can only fail on unusable key material, which is a configuration
/// fault rather than a per-request condition; callers must surface it, never
/// return a partial token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token signing failed: {message}")]
pub struct TokenSigningError {
    message: String,
}

/// Validation failure kinds.
///
/// Adapters must collapse all three into one opaque unauthenticated response
/// so clients cannot probe which check failed; the distinction exists for
/// logging only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Token could not be parsed or its claims are not well formed.
    #[error("token is malformed")]
    Malformed,
    /// Signature did not verify against the configured secret.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Current time is at or past the embedded expiry.
    #[error("token has expired")]
    Expired,
}

/// Issues signed session tokens for already-authenticated users.
///
/// Never re-checks credentials; the authentication flow runs the password
/// verifier before calling [`TokenIssuer::issue`].
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<TokenKeys>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer over shared key material.
    pub fn new(keys: Arc<TokenKeys>, clock: Arc<dyn Clock>) -> Self {
        Self { keys, clock }
    }

    /// Build, sign, and serialize a claim set for `user`.
    pub fn issue(&self, user: &User) -> Result<SessionToken, TokenSigningError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            admin: user.is_admin(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map(SessionToken)
            .map_err(|err| TokenSigningError {
                message: err.to_string(),
            })
    }
}

/// Validates inbound session tokens and recovers the caller identity.
#[derive(Clone)]
pub struct TokenValidator {
    keys: Arc<TokenKeys>,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator over shared key material.
    pub fn new(keys: Arc<TokenKeys>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock below, with zero
        // leeway: a token is rejected from its expiration instant onward.
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);
        Self {
            keys,
            clock,
            validation,
        }
    }

    /// Verify signature and expiry, recovering the claims-embedded identity.
    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        let decoded = jsonwebtoken::decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        let claims = decoded.claims;
        if self.clock.now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| TokenError::Malformed)?;
        let email = Email::new(claims.email).map_err(|_| TokenError::Malformed)?;
        Ok(Identity::new(user_id, email, claims.admin))
    }
}
