//! In-memory port implementations and fixtures for handler tests.
//!
//! Mirrors the stub-repository style used across the domain tests, but
//! bundles everything an `App` needs: repositories, a controllable clock,
//! and wired [`AppState`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::ports::{
    BookingPersistenceError, BookingRepository, HotelPersistenceError, HotelRepository,
    RoomPersistenceError, RoomRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Booking, BookingDraft, BookingId, Clock, CredentialAuthService, Email, Hotel, HotelId, Room,
    RoomDraft, RoomId, SigningSecret, TokenIssuer, TokenKeys, TokenValidator, User, UserId,
};

use super::state::AppState;

/// Clock whose current instant tests can move forward.
#[derive(Clone)]
pub struct SharedClock(Arc<Mutex<DateTime<Utc>>>);

impl SharedClock {
    fn starting_now() -> Self {
        Self(Arc::new(Mutex::new(Utc::now())))
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.0.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for SharedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// In-memory `UserRepository`.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(
                user.email().to_string(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|u| u.email() == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.lock().expect("users lock").clone())
    }

    async fn update_names(
        &self,
        id: &UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        let Some(position) = users.iter().position(|u| u.id() == id) else {
            return Ok(false);
        };
        let existing = users[position].clone();
        let updated = User::new(
            *existing.id(),
            existing.email().clone(),
            first_name,
            last_name,
            existing.password_hash(),
            existing.is_admin(),
            existing.created_at(),
        )
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        users[position] = updated;
        Ok(true)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut users = self.users.lock().expect("users lock");
        let before = users.len();
        users.retain(|u| u.id() != id);
        Ok(users.len() < before)
    }
}

/// In-memory `HotelRepository` that the room store mutates.
#[derive(Default)]
pub struct InMemoryHotels {
    hotels: Mutex<Vec<Hotel>>,
}

impl InMemoryHotels {
    /// Seed a hotel.
    pub fn put(&self, hotel: Hotel) {
        self.hotels.lock().expect("hotels lock").push(hotel);
    }

    fn append_room(&self, hotel_id: &HotelId, room_id: RoomId) -> bool {
        let mut hotels = self.hotels.lock().expect("hotels lock");
        let Some(position) = hotels.iter().position(|h| h.id() == hotel_id) else {
            return false;
        };
        let existing = hotels[position].clone();
        if existing.owns_room(&room_id) {
            return true;
        }
        let mut rooms = existing.rooms().to_vec();
        rooms.push(room_id);
        let updated = Hotel::new(
            *existing.id(),
            existing.name(),
            existing.location(),
            existing.rating(),
            rooms,
        )
        .expect("existing hotel stays valid");
        hotels[position] = updated;
        true
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotels {
    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelPersistenceError> {
        let hotels = self.hotels.lock().expect("hotels lock");
        Ok(hotels.iter().find(|h| h.id() == id).cloned())
    }

    async fn list(&self, min_rating: Option<i32>) -> Result<Vec<Hotel>, HotelPersistenceError> {
        let hotels = self.hotels.lock().expect("hotels lock");
        Ok(hotels
            .iter()
            .filter(|h| min_rating.is_none_or(|min| h.rating() >= min))
            .cloned()
            .collect())
    }
}

/// In-memory `RoomRepository` upholding the referential invariant against
/// [`InMemoryHotels`].
pub struct InMemoryRooms {
    rooms: Mutex<Vec<Room>>,
    hotels: Arc<InMemoryHotels>,
}

impl InMemoryRooms {
    /// Create a room store cascading into `hotels`.
    pub fn new(hotels: Arc<InMemoryHotels>) -> Self {
        Self {
            rooms: Mutex::new(Vec::new()),
            hotels,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRooms {
    async fn create(&self, draft: &RoomDraft) -> Result<Room, RoomPersistenceError> {
        let room = Room::new(
            RoomId::random(),
            *draft.hotel_id(),
            draft.size(),
            draft.seaside(),
            draft.price(),
        );
        if !self.hotels.append_room(draft.hotel_id(), *room.id()) {
            return Err(RoomPersistenceError::hotel_missing(*draft.hotel_id()));
        }
        self.rooms.lock().expect("rooms lock").push(room.clone());
        Ok(room)
    }

    async fn list(&self) -> Result<Vec<Room>, RoomPersistenceError> {
        Ok(self.rooms.lock().expect("rooms lock").clone())
    }

    async fn list_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Vec<Room>, RoomPersistenceError> {
        let rooms = self.rooms.lock().expect("rooms lock");
        Ok(rooms
            .iter()
            .filter(|r| r.hotel_id() == hotel_id)
            .cloned()
            .collect())
    }
}

/// In-memory `BookingRepository`.
#[derive(Default)]
pub struct InMemoryBookings {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookings {
    /// Seed a booking.
    pub fn put(&self, booking: Booking) {
        self.bookings.lock().expect("bookings lock").push(booking);
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, BookingPersistenceError> {
        let booking = Booking::new(
            BookingId::random(),
            *draft.user_id(),
            *draft.room_id(),
            draft.from_date(),
            draft.till_date(),
            draft.num_persons(),
            false,
        );
        self.put(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(
        &self,
        id: &BookingId,
    ) -> Result<Option<Booking>, BookingPersistenceError> {
        let bookings = self.bookings.lock().expect("bookings lock");
        Ok(bookings.iter().find(|b| b.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Booking>, BookingPersistenceError> {
        Ok(self.bookings.lock().expect("bookings lock").clone())
    }

    async fn cancel(&self, id: &BookingId) -> Result<bool, BookingPersistenceError> {
        let mut bookings = self.bookings.lock().expect("bookings lock");
        let Some(position) = bookings.iter().position(|b| b.id() == id) else {
            return Ok(false);
        };
        let existing = bookings[position].clone();
        bookings[position] = Booking::new(
            *existing.id(),
            *existing.user_id(),
            *existing.room_id(),
            existing.from_date(),
            existing.till_date(),
            existing.num_persons(),
            true,
        );
        Ok(true)
    }
}

/// Everything a handler test needs.
pub struct StubState {
    /// Wired application state.
    pub state: AppState,
    /// Key material shared by issuer and validator.
    pub keys: Arc<TokenKeys>,
    /// Controllable clock shared by issuer and validator.
    pub clock: SharedClock,
    /// Backing user store.
    pub users: Arc<InMemoryUsers>,
    /// Backing hotel store.
    pub hotels: Arc<InMemoryHotels>,
    /// Backing room store.
    pub rooms: Arc<InMemoryRooms>,
    /// Backing booking store.
    pub bookings: Arc<InMemoryBookings>,
}

impl StubState {
    /// Sign a token for `user` with the state's keys and clock.
    pub fn issue_token_for_user(&self, user: &User) -> String {
        let clock: Arc<dyn Clock> = Arc::new(self.clock.clone());
        let issuer = TokenIssuer::new(self.keys.clone(), clock);
        issuer.issue(user).expect("signing succeeds").into()
    }

    /// Construct a user, store it, and return it with a valid token.
    pub fn register_user(&self, email: &str, admin: bool) -> (User, String) {
        let user = make_user(email, admin);
        self.users
            .users
            .lock()
            .expect("users lock")
            .push(user.clone());
        let token = self.issue_token_for_user(&user);
        (user, token)
    }
}

/// Construct a valid user fixture; the stored hash matches `"s3cretpass"`
/// at the minimum bcrypt cost.
pub fn make_user(email: &str, admin: bool) -> User {
    let hash = bcrypt::hash("s3cretpass", 4).expect("hashing succeeds");
    User::new(
        UserId::random(),
        Email::new(email).expect("valid email"),
        "Ada",
        "Lovelace",
        hash,
        admin,
        Utc::now(),
    )
    .expect("valid user")
}

/// Construct a hotel fixture with no rooms.
pub fn make_hotel(name: &str) -> Hotel {
    Hotel::new(HotelId::random(), name, "Novigrad", 4, vec![]).expect("valid hotel")
}

/// Wire an [`AppState`] over fresh in-memory stores.
pub fn test_state() -> StubState {
    let secret =
        SigningSecret::new(vec![42u8; crate::domain::token::SECRET_MIN_BYTES])
            .expect("valid secret");
    let keys = Arc::new(TokenKeys::from_secret(&secret));
    let clock = SharedClock::starting_now();
    let clock_handle: Arc<dyn Clock> = Arc::new(clock.clone());

    let users = Arc::new(InMemoryUsers::default());
    let hotels = Arc::new(InMemoryHotels::default());
    let rooms = Arc::new(InMemoryRooms::new(hotels.clone()));
    let bookings = Arc::new(InMemoryBookings::default());

    let issuer = TokenIssuer::new(keys.clone(), clock_handle.clone());
    let auth = Arc::new(CredentialAuthService::new(users.clone(), issuer));
    let validator = TokenValidator::new(keys.clone(), clock_handle);

    let state = AppState {
        auth,
        validator,
        users: users.clone(),
        hotels: hotels.clone(),
        rooms: rooms.clone(),
        bookings: bookings.clone(),
    };

    StubState {
        state,
        keys,
        clock,
        users,
        hotels,
        rooms,
        bookings,
    }
}
