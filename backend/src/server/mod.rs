//! Server wiring: application state construction and route registration.

pub mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::web;

use crate::api::{self, AppState};
use crate::domain::{
    Clock, CredentialAuthService, SigningSecret, SystemClock, TokenIssuer, TokenKeys,
    TokenValidator,
};
use crate::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselHotelRepository, DieselRoomRepository,
    DieselUserRepository,
};

/// Wire Diesel-backed adapters and the token components into an
/// [`AppState`].
pub fn build_state(pool: DbPool, secret: &SigningSecret) -> AppState {
    let keys = Arc::new(TokenKeys::from_secret(secret));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let issuer = TokenIssuer::new(keys.clone(), clock.clone());
    let auth = Arc::new(CredentialAuthService::new(users.clone(), issuer));
    let validator = TokenValidator::new(keys, clock);

    AppState {
        auth,
        validator,
        users,
        hotels: Arc::new(DieselHotelRepository::new(pool.clone())),
        rooms: Arc::new(DieselRoomRepository::new(pool.clone())),
        bookings: Arc::new(DieselBookingRepository::new(pool)),
    }
}

/// Register the `/api/v1` surface on a service config.
pub fn configure_api(cfg: &mut web::ServiceConfig, state: AppState) {
    cfg.app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(api::auth::authenticate)
            .service(api::users::create_user)
            .service(api::users::list_users)
            .service(api::users::get_user)
            .service(api::users::update_user)
            .service(api::users::delete_user)
            .service(api::hotels::list_hotels)
            .service(api::hotels::get_hotel)
            .service(api::hotels::list_hotel_rooms)
            .service(api::rooms::list_rooms)
            .service(api::rooms::create_room)
            .service(api::bookings::list_bookings)
            .service(api::bookings::get_booking)
            .service(api::bookings::cancel_booking)
            .service(api::bookings::book_room),
    );
}
