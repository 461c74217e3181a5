//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookingRepository, HotelRepository, RoomRepository, UserRepository};
use crate::domain::{AuthService, TokenValidator};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential authentication flow.
    pub auth: Arc<dyn AuthService>,
    /// Session token validation for the bearer extractor.
    pub validator: TokenValidator,
    /// User records.
    pub users: Arc<dyn UserRepository>,
    /// Hotel records.
    pub hotels: Arc<dyn HotelRepository>,
    /// Rooms, behind the referential store.
    pub rooms: Arc<dyn RoomRepository>,
    /// Booking records.
    pub bookings: Arc<dyn BookingRepository>,
}
