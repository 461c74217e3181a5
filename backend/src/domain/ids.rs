//! Opaque entity identifiers.
//!
//! Every aggregate is addressed by a UUID wrapped in its own newtype so a
//! booking id can never be passed where a hotel id is expected. Construction
//! from strings validates the UUID shape; serde round-trips through the
//! canonical hyphenated form.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when an identifier string is not a valid UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidId;

impl fmt::Display for InvalidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("identifier must be a valid UUID")
    }
}

impl std::error::Error for InvalidId {}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct an identifier from string input.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidId> {
                let raw = raw.as_ref();
                if raw.trim() != raw {
                    return Err(InvalidId);
                }
                Uuid::parse_str(raw).map(Self).map_err(|_| InvalidId)
            }

            /// Wrap an already-parsed UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

entity_id! {
    /// Stable user identifier.
    UserId
}

entity_id! {
    /// Stable hotel identifier.
    HotelId
}

entity_id! {
    /// Stable room identifier, assigned when the room is created.
    RoomId
}

entity_id! {
    /// Stable booking identifier.
    BookingId
}
