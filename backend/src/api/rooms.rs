//! Rooms API handlers.
//!
//! Room creation is the referential write: it must either persist the room
//! and extend the owning hotel's room set together, or do neither.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::{RoomPersistenceError, RoomRepository};
use crate::domain::{Error, HotelId, Room, RoomDraft, RoomId, RoomSize};

use super::error::{ApiError, ApiResult};
use super::identity::Authenticated;
use super::state::AppState;

/// Wire representation of a room.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    /// Store-assigned identifier.
    #[schema(value_type = String)]
    pub id: RoomId,
    /// Owning hotel.
    #[schema(value_type = String)]
    pub hotel_id: HotelId,
    /// Size category: small, normal, or kingsize.
    #[schema(example = "normal")]
    pub size: String,
    /// Whether the room faces the sea.
    pub seaside: bool,
    /// Nightly price.
    pub price: f64,
}

impl From<&Room> for RoomPayload {
    fn from(room: &Room) -> Self {
        Self {
            id: *room.id(),
            hotel_id: *room.hotel_id(),
            size: room.size().to_string(),
            seaside: room.seaside(),
            price: room.price(),
        }
    }
}

/// Room creation request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomParams {
    /// Owning hotel identifier.
    pub hotel_id: String,
    /// Size category: small, normal, or kingsize.
    pub size: String,
    /// Whether the room faces the sea.
    #[serde(default)]
    pub seaside: bool,
    /// Nightly price.
    pub price: f64,
}

pub(super) fn map_room_persistence_error(error: RoomPersistenceError) -> ApiError {
    match error {
        RoomPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("room repository unavailable: {message}")).into()
        }
        RoomPersistenceError::Query { message } => {
            Error::internal(format!("room repository error: {message}")).into()
        }
        RoomPersistenceError::HotelMissing { hotel_id } => {
            Error::not_found(format!("hotel {hotel_id} does not exist")).into()
        }
        RoomPersistenceError::Integrity { message } => {
            // Partial-write detail belongs in the log, not on the wire.
            error!(detail = %message, "room create left the hotel room set unchanged");
            Error::internal("room creation failed").into()
        }
    }
}

/// List all rooms.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    responses(
        (status = 200, description = "Rooms", body = [RoomPayload]),
        (status = 401, description = "Unauthorised", body = super::error::ApiError)
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<AppState>,
    _caller: Authenticated,
) -> ApiResult<web::Json<Vec<RoomPayload>>> {
    let rooms = state
        .rooms
        .list()
        .await
        .map_err(map_room_persistence_error)?;
    Ok(web::Json(rooms.iter().map(RoomPayload::from).collect()))
}

/// Create a room under an existing hotel.
///
/// The referenced hotel must exist; on success the hotel's room set contains
/// the new room's identifier.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomParams,
    responses(
        (status = 201, description = "Room created", body = RoomPayload),
        (status = 400, description = "Invalid room payload", body = super::error::ApiError),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 403, description = "Administrator access required", body = super::error::ApiError),
        (status = 404, description = "Referenced hotel does not exist", body = super::error::ApiError)
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<AppState>,
    caller: Authenticated,
    params: web::Json<CreateRoomParams>,
) -> ApiResult<HttpResponse> {
    caller.require_admin()?;

    let params = params.into_inner();
    let hotel_id = HotelId::new(&params.hotel_id)
        .map_err(|_| ApiError::from(Error::invalid_request("hotel id must be a valid UUID")))?;
    let size = RoomSize::parse(&params.size)
        .map_err(|err| ApiError::from(Error::invalid_request(err.to_string())))?;
    let draft = RoomDraft::new(hotel_id, size, params.seaside, params.price)
        .map_err(|err| ApiError::from(Error::invalid_request(err.to_string())))?;

    let room = state
        .rooms
        .create(&draft)
        .await
        .map_err(map_room_persistence_error)?;

    Ok(HttpResponse::Created().json(RoomPayload::from(&room)))
}
