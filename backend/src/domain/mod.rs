//! Domain primitives, aggregates, and the access & referential-integrity
//! core.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, plus the three correctness-critical components:
//! credential authentication with stateless token issue/validate, the
//! booking access guard, and the ports behind which the referential room
//! store lives. Keep types immutable and document invariants in each type's
//! Rustdoc.

pub mod auth;
pub mod auth_service;
pub mod booking;
pub mod booking_access;
pub mod error;
pub mod hotel;
pub mod ids;
pub mod password;
pub mod ports;
pub mod room;
pub mod token;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::auth_service::{
    AuthService, AuthenticatedUser, CredentialAuthService, INVALID_CREDENTIALS,
};
pub use self::booking::{Booking, BookingDraft, BookingValidationError};
pub use self::booking_access::{Access, authorize_read};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hotel::{Hotel, HotelValidationError};
pub use self::ids::{BookingId, HotelId, InvalidId, RoomId, UserId};
pub use self::room::{Room, RoomDraft, RoomSize, RoomValidationError};
pub use self::token::{
    Clock, Identity, SessionToken, SigningSecret, SigningSecretError, SystemClock, TokenError,
    TokenIssuer, TokenKeys, TokenValidator,
};
pub use self::user::{Email, User, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
