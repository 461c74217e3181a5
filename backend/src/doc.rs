//! OpenAPI document assembled from the annotated handlers.

use utoipa::OpenApi;

use crate::api;

/// OpenAPI description of the reservation API.
#[derive(OpenApi)]
#[openapi(
    paths(
        api::auth::authenticate,
        api::users::create_user,
        api::users::list_users,
        api::users::get_user,
        api::users::update_user,
        api::users::delete_user,
        api::hotels::list_hotels,
        api::hotels::get_hotel,
        api::hotels::list_hotel_rooms,
        api::rooms::list_rooms,
        api::rooms::create_room,
        api::bookings::list_bookings,
        api::bookings::get_booking,
        api::bookings::cancel_booking,
        api::bookings::book_room,
        api::health::ready,
        api::health::live,
    ),
    components(schemas(
        api::error::ApiError,
        api::auth::AuthParams,
        api::auth::AuthResponse,
        api::users::UserPayload,
        api::users::CreateUserParams,
        api::users::UpdateUserParams,
        api::users::MutatedResponse,
        api::hotels::HotelPayload,
        api::rooms::RoomPayload,
        api::rooms::CreateRoomParams,
        api::bookings::BookingPayload,
        api::bookings::BookRoomParams,
        api::bookings::CanceledResponse,
    )),
    tags(
        (name = "auth", description = "Credential authentication"),
        (name = "users", description = "User accounts"),
        (name = "hotels", description = "Hotel catalogue"),
        (name = "rooms", description = "Rooms and the referential create"),
        (name = "bookings", description = "Bookings and ownership"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
