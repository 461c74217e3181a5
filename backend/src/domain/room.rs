//! Room aggregate.
//!
//! Rooms are created exclusively through the referential room store so the
//! owning hotel's room-ID set stays consistent with the back-reference held
//! here. The `hotel_id` is caller-set at creation and immutable afterwards.

use std::fmt;

use super::ids::{HotelId, RoomId};

/// Validation errors returned by the room constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomValidationError {
    /// Price was zero, negative, or not finite.
    InvalidPrice,
    /// Size string did not name a known room size.
    UnknownSize {
        /// The rejected input.
        value: String,
    },
}

impl fmt::Display for RoomValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrice => write!(f, "room price must be a positive amount"),
            Self::UnknownSize { value } => {
                write!(f, "unknown room size {value:?}; expected small, normal, or kingsize")
            }
        }
    }
}

impl std::error::Error for RoomValidationError {}

/// Physical size category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSize {
    /// Single or compact double.
    Small,
    /// Standard double.
    Normal,
    /// King-size suite.
    Kingsize,
}

impl RoomSize {
    /// Canonical lowercase wire and storage form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Kingsize => "kingsize",
        }
    }

    /// Parse the canonical lowercase form.
    pub fn parse(raw: &str) -> Result<Self, RoomValidationError> {
        match raw {
            "small" => Ok(Self::Small),
            "normal" => Ok(Self::Normal),
            "kingsize" => Ok(Self::Kingsize),
            other => Err(RoomValidationError::UnknownSize {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RoomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of a room that exist before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    hotel_id: HotelId,
    size: RoomSize,
    seaside: bool,
    price: f64,
}

impl RoomDraft {
    /// Validate and construct a draft for the referential create.
    pub fn new(
        hotel_id: HotelId,
        size: RoomSize,
        seaside: bool,
        price: f64,
    ) -> Result<Self, RoomValidationError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(RoomValidationError::InvalidPrice);
        }
        Ok(Self {
            hotel_id,
            size,
            seaside,
            price,
        })
    }

    /// Owning hotel reference.
    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    /// Size category.
    pub fn size(&self) -> RoomSize {
        self.size
    }

    /// Whether the room faces the sea.
    pub fn seaside(&self) -> bool {
        self.seaside
    }

    /// Nightly price.
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// A persisted room with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: RoomId,
    hotel_id: HotelId,
    size: RoomSize,
    seaside: bool,
    price: f64,
}

impl Room {
    /// Assemble a room from persisted components.
    pub fn new(id: RoomId, hotel_id: HotelId, size: RoomSize, seaside: bool, price: f64) -> Self {
        Self {
            id,
            hotel_id,
            size,
            seaside,
            price,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Owning hotel reference, immutable after creation.
    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    /// Size category.
    pub fn size(&self) -> RoomSize {
        self.size
    }

    /// Whether the room faces the sea.
    pub fn seaside(&self) -> bool {
        self.seaside
    }

    /// Nightly price.
    pub fn price(&self) -> f64 {
        self.price
    }
}
