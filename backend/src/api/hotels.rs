//! Hotels API handlers.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{HotelPersistenceError, HotelRepository};
use crate::domain::{Error, Hotel, HotelId};

use super::error::{ApiError, ApiResult};
use super::identity::Authenticated;
use super::rooms::{RoomPayload, map_room_persistence_error};
use super::state::AppState;

/// Wire representation of a hotel.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelPayload {
    /// Stable identifier.
    #[schema(value_type = String)]
    pub id: HotelId,
    /// Display name.
    pub name: String,
    /// Free-form location.
    pub location: String,
    /// Star rating.
    pub rating: i32,
    /// Identifiers of the rooms this hotel owns.
    #[schema(value_type = Vec<String>)]
    pub rooms: Vec<String>,
}

impl From<&Hotel> for HotelPayload {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: *hotel.id(),
            name: hotel.name().to_owned(),
            location: hotel.location().to_owned(),
            rating: hotel.rating(),
            rooms: hotel.rooms().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Query parameters accepted by the hotel listing.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct HotelQueryParams {
    /// Keep only hotels rated at least this highly.
    pub rating: Option<i32>,
}

pub(super) fn map_hotel_persistence_error(error: HotelPersistenceError) -> ApiError {
    match error {
        HotelPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("hotel repository unavailable: {message}")).into()
        }
        HotelPersistenceError::Query { message } => {
            Error::internal(format!("hotel repository error: {message}")).into()
        }
    }
}

pub(super) fn parse_hotel_id(raw: &str) -> Result<HotelId, ApiError> {
    HotelId::new(raw)
        .map_err(|_| Error::invalid_request("hotel id must be a valid UUID").into())
}

/// List hotels.
#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    params(HotelQueryParams),
    responses(
        (status = 200, description = "Hotels", body = [HotelPayload]),
        (status = 401, description = "Unauthorised", body = super::error::ApiError)
    ),
    tags = ["hotels"],
    operation_id = "listHotels"
)]
#[get("/hotels")]
pub async fn list_hotels(
    state: web::Data<AppState>,
    _caller: Authenticated,
    query: web::Query<HotelQueryParams>,
) -> ApiResult<web::Json<Vec<HotelPayload>>> {
    let hotels = state
        .hotels
        .list(query.rating)
        .await
        .map_err(map_hotel_persistence_error)?;
    Ok(web::Json(hotels.iter().map(HotelPayload::from).collect()))
}

/// Fetch a single hotel.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    params(("id" = String, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Hotel", body = HotelPayload),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "Hotel not found", body = super::error::ApiError)
    ),
    tags = ["hotels"],
    operation_id = "getHotel"
)]
#[get("/hotels/{id}")]
pub async fn get_hotel(
    state: web::Data<AppState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<HotelPayload>> {
    let id = parse_hotel_id(&path)?;
    let hotel = state
        .hotels
        .find_by_id(&id)
        .await
        .map_err(map_hotel_persistence_error)?
        .ok_or_else(|| ApiError::from(Error::not_found("hotel not found")))?;
    Ok(web::Json(HotelPayload::from(&hotel)))
}

/// List the rooms a hotel owns.
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/rooms",
    params(("id" = String, Path, description = "Hotel identifier")),
    responses(
        (status = 200, description = "Rooms", body = [RoomPayload]),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "Hotel not found", body = super::error::ApiError)
    ),
    tags = ["hotels"],
    operation_id = "listHotelRooms"
)]
#[get("/hotels/{id}/rooms")]
pub async fn list_hotel_rooms(
    state: web::Data<AppState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RoomPayload>>> {
    let id = parse_hotel_id(&path)?;
    let hotel = state
        .hotels
        .find_by_id(&id)
        .await
        .map_err(map_hotel_persistence_error)?;
    if hotel.is_none() {
        return Err(Error::not_found("hotel not found").into());
    }

    let rooms = state
        .rooms
        .list_for_hotel(&id)
        .await
        .map_err(map_room_persistence_error)?;
    Ok(web::Json(rooms.iter().map(RoomPayload::from).collect()))
}
