//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the PostgreSQL stores). Each trait exposes strongly typed errors so
//! adapters map their failures into predictable variants instead of
//! returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::booking::{Booking, BookingDraft};
use super::hotel::Hotel;
use super::ids::{BookingId, HotelId, UserId};
use super::room::{Room, RoomDraft};
use super::user::{Email, User};

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied detail.
        message: String,
    },
    /// Another user already holds the email address.
    #[error("email {email} is already registered")]
    DuplicateEmail {
        /// The conflicting address.
        email: String,
    },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-email conflicts.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Persistence errors raised by [`HotelRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotelPersistenceError {
    /// Repository connection could not be established.
    #[error("hotel repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("hotel repository query failed: {message}")]
    Query {
        /// Adapter-supplied detail.
        message: String,
    },
}

impl HotelPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`RoomRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomPersistenceError {
    /// Repository connection could not be established.
    #[error("room repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("room repository query failed: {message}")]
    Query {
        /// Adapter-supplied detail.
        message: String,
    },
    /// The referenced hotel does not exist; no room was created.
    #[error("hotel {hotel_id} does not exist")]
    HotelMissing {
        /// The dangling reference supplied by the caller.
        hotel_id: HotelId,
    },
    /// The cascading room-set update failed; the create was rolled back.
    ///
    /// Distinct from [`Self::Query`] so callers can tell a failed plain
    /// insert from a failure of the consistency-preserving step.
    #[error("room set update failed: {message}")]
    Integrity {
        /// Adapter-supplied detail.
        message: String,
    },
}

impl RoomPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for dangling hotel references.
    pub fn hotel_missing(hotel_id: HotelId) -> Self {
        Self::HotelMissing { hotel_id }
    }

    /// Helper for cascading-update failures.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`BookingRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingPersistenceError {
    /// Repository connection could not be established.
    #[error("booking repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("booking repository query failed: {message}")]
    Query {
        /// Adapter-supplied detail.
        message: String,
    },
}

impl BookingPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user records.
///
/// Doubles as the credential store: the authentication flow looks callers up
/// by email and never mutates what it reads.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email, compared exactly as stored.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// List all users.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Update the caller-editable name fields; `false` when the user is
    /// absent.
    async fn update_names(
        &self,
        id: &UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<bool, UserPersistenceError>;

    /// Delete a user; `false` when the user is absent.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}

/// Persistence port for hotel records.
///
/// Hotels are mutated only through the referential room create; this port is
/// read-only.
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Fetch a hotel by identifier.
    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelPersistenceError>;

    /// List hotels, optionally filtered to a minimum rating.
    async fn list(&self, min_rating: Option<i32>) -> Result<Vec<Hotel>, HotelPersistenceError>;
}

/// Persistence port for rooms, owning the hotel/room referential invariant.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Referential create: assign a fresh room id, persist the room, and
    /// append the id to the owning hotel's room set so the reverse
    /// reference stays consistent with the `hotel_id` back-reference.
    ///
    /// Fails with [`RoomPersistenceError::HotelMissing`] when the referenced
    /// hotel does not exist, leaving no room record behind. Concurrent
    /// creates against the same hotel must not lose an append.
    async fn create(&self, draft: &RoomDraft) -> Result<Room, RoomPersistenceError>;

    /// List all rooms.
    async fn list(&self) -> Result<Vec<Room>, RoomPersistenceError>;

    /// List the rooms whose back-reference names the hotel.
    async fn list_for_hotel(&self, hotel_id: &HotelId)
    -> Result<Vec<Room>, RoomPersistenceError>;
}

/// Persistence port for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking, assigning its identifier.
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, BookingPersistenceError>;

    /// Fetch a booking by identifier.
    async fn find_by_id(
        &self,
        id: &BookingId,
    ) -> Result<Option<Booking>, BookingPersistenceError>;

    /// List all bookings.
    async fn list(&self) -> Result<Vec<Booking>, BookingPersistenceError>;

    /// Mark a booking canceled; `false` when the booking is absent.
    async fn cancel(&self, id: &BookingId) -> Result<bool, BookingPersistenceError>;
}
