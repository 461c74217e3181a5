//! Hotel aggregate.

use std::fmt;

use super::ids::{HotelId, RoomId};

/// Validation errors returned by [`Hotel::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotelValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Location was blank once trimmed.
    EmptyLocation,
    /// Rating fell outside the accepted range.
    RatingOutOfRange {
        /// Inclusive lower bound.
        min: i32,
        /// Inclusive upper bound.
        max: i32,
    },
}

impl fmt::Display for HotelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "hotel name must not be empty"),
            Self::EmptyLocation => write!(f, "hotel location must not be empty"),
            Self::RatingOutOfRange { min, max } => {
                write!(f, "hotel rating must be between {min} and {max}")
            }
        }
    }
}

impl std::error::Error for HotelValidationError {}

/// Inclusive rating lower bound.
pub const RATING_MIN: i32 = 1;
/// Inclusive rating upper bound.
pub const RATING_MAX: i32 = 5;

/// A hotel and the denormalised set of room identifiers it owns.
///
/// ## Invariants
/// - `rooms` is exactly the set of rooms whose `hotel_id` references this
///   hotel. The referential room store maintains the invariant; the domain
///   type only carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    id: HotelId,
    name: String,
    location: String,
    rating: i32,
    rooms: Vec<RoomId>,
}

impl Hotel {
    /// Assemble a hotel from validated components.
    pub fn new(
        id: HotelId,
        name: impl Into<String>,
        location: impl Into<String>,
        rating: i32,
        rooms: Vec<RoomId>,
    ) -> Result<Self, HotelValidationError> {
        let name = name.into();
        let location = location.into();
        if name.trim().is_empty() {
            return Err(HotelValidationError::EmptyName);
        }
        if location.trim().is_empty() {
            return Err(HotelValidationError::EmptyLocation);
        }
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(HotelValidationError::RatingOutOfRange {
                min: RATING_MIN,
                max: RATING_MAX,
            });
        }
        Ok(Self {
            id,
            name,
            location,
            rating,
            rooms,
        })
    }

    /// Stable hotel identifier.
    pub fn id(&self) -> &HotelId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form location string.
    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Star rating between [`RATING_MIN`] and [`RATING_MAX`].
    pub fn rating(&self) -> i32 {
        self.rating
    }

    /// Identifiers of the rooms this hotel owns. Order is irrelevant.
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Whether the hotel's room set already contains `room_id`.
    pub fn owns_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains(room_id)
    }
}
