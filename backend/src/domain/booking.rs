//! Booking aggregate.
//!
//! Ownership is permanent: the `user_id` recorded at creation never changes,
//! and the booking access guard keys on it.

use std::fmt;

use chrono::{DateTime, Utc};

use super::ids::{BookingId, RoomId, UserId};

/// Validation errors returned by the booking constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    /// The stay ends on or before it starts.
    EmptyStay,
    /// Guest count was zero or negative.
    InvalidGuestCount,
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStay => write!(f, "booking must end after it starts"),
            Self::InvalidGuestCount => write!(f, "booking must have at least one guest"),
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Attributes of a booking that exist before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    user_id: UserId,
    room_id: RoomId,
    from_date: DateTime<Utc>,
    till_date: DateTime<Utc>,
    num_persons: i32,
}

impl BookingDraft {
    /// Validate and construct a draft booking.
    pub fn new(
        user_id: UserId,
        room_id: RoomId,
        from_date: DateTime<Utc>,
        till_date: DateTime<Utc>,
        num_persons: i32,
    ) -> Result<Self, BookingValidationError> {
        if till_date <= from_date {
            return Err(BookingValidationError::EmptyStay);
        }
        if num_persons < 1 {
            return Err(BookingValidationError::InvalidGuestCount);
        }
        Ok(Self {
            user_id,
            room_id,
            from_date,
            till_date,
            num_persons,
        })
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Booked room.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Stay start.
    pub fn from_date(&self) -> DateTime<Utc> {
        self.from_date
    }

    /// Stay end.
    pub fn till_date(&self) -> DateTime<Utc> {
        self.till_date
    }

    /// Number of guests.
    pub fn num_persons(&self) -> i32 {
        self.num_persons
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    user_id: UserId,
    room_id: RoomId,
    from_date: DateTime<Utc>,
    till_date: DateTime<Utc>,
    num_persons: i32,
    canceled: bool,
}

impl Booking {
    /// Assemble a booking from persisted components.
    pub fn new(
        id: BookingId,
        user_id: UserId,
        room_id: RoomId,
        from_date: DateTime<Utc>,
        till_date: DateTime<Utc>,
        num_persons: i32,
        canceled: bool,
    ) -> Self {
        Self {
            id,
            user_id,
            room_id,
            from_date,
            till_date,
            num_persons,
            canceled,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &BookingId {
        &self.id
    }

    /// Owner of the booking; never reassigned.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Booked room.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Stay start.
    pub fn from_date(&self) -> DateTime<Utc> {
        self.from_date
    }

    /// Stay end.
    pub fn till_date(&self) -> DateTime<Utc> {
        self.till_date
    }

    /// Number of guests.
    pub fn num_persons(&self) -> i32 {
        self.num_persons
    }

    /// Whether the booking has been canceled.
    pub fn canceled(&self) -> bool {
        self.canceled
    }
}
