//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the SQL migrations exactly; they drive
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique email, compared exactly as stored.
        email -> Varchar,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// One-way salted bcrypt hash.
        password_hash -> Varchar,
        /// Administrative capability flag.
        admin -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Hotels with their denormalised room-ID sets.
    hotels (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Free-form location.
        location -> Varchar,
        /// Star rating, 1 to 5.
        rating -> Int4,
        /// Identifiers of the rooms this hotel owns. Maintained solely by
        /// the referential room create.
        rooms -> Array<Uuid>,
    }
}

diesel::table! {
    /// Rooms referencing their owning hotel.
    rooms (id) {
        /// Primary key: UUID v4 identifier, assigned at creation.
        id -> Uuid,
        /// Owning hotel back-reference; immutable after creation.
        hotel_id -> Uuid,
        /// Size category: small, normal, or kingsize.
        size -> Varchar,
        /// Whether the room faces the sea.
        seaside -> Bool,
        /// Nightly price.
        price -> Float8,
    }
}

diesel::table! {
    /// Bookings owned by users.
    bookings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owner; never reassigned.
        user_id -> Uuid,
        /// Booked room.
        room_id -> Uuid,
        /// Stay start.
        from_date -> Timestamptz,
        /// Stay end.
        till_date -> Timestamptz,
        /// Number of guests.
        num_persons -> Int4,
        /// Whether the booking has been canceled.
        canceled -> Bool,
    }
}

diesel::joinable!(rooms -> hotels (hotel_id));
diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(users, hotels, rooms, bookings);
