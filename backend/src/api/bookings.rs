//! Bookings API handlers.
//!
//! Reads and cancellations run through the booking access guard. A denied
//! read is answered with the same 404 as a missing booking so non-owners
//! cannot confirm that another user's booking exists; the denial itself is
//! logged for audit.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{BookingPersistenceError, BookingRepository};
use crate::domain::{
    Access, Booking, BookingDraft, BookingId, Error, Identity, RoomId, authorize_read,
};

use super::error::{ApiError, ApiResult};
use super::identity::Authenticated;
use super::state::AppState;

/// Wire representation of a booking.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    /// Store-assigned identifier.
    #[schema(value_type = String)]
    pub id: BookingId,
    /// Owner of the booking.
    #[schema(value_type = String)]
    pub user_id: String,
    /// Booked room.
    #[schema(value_type = String)]
    pub room_id: String,
    /// Stay start.
    pub from_date: DateTime<Utc>,
    /// Stay end.
    pub till_date: DateTime<Utc>,
    /// Number of guests.
    pub num_persons: i32,
    /// Whether the booking has been canceled.
    pub canceled: bool,
}

impl From<&Booking> for BookingPayload {
    fn from(booking: &Booking) -> Self {
        Self {
            id: *booking.id(),
            user_id: booking.user_id().to_string(),
            room_id: booking.room_id().to_string(),
            from_date: booking.from_date(),
            till_date: booking.till_date(),
            num_persons: booking.num_persons(),
            canceled: booking.canceled(),
        }
    }
}

/// Room booking request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRoomParams {
    /// Stay start.
    pub from_date: DateTime<Utc>,
    /// Stay end.
    pub till_date: DateTime<Utc>,
    /// Number of guests.
    pub num_persons: i32,
}

/// Response body naming a canceled booking.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanceledResponse {
    /// Identifier of the canceled booking.
    #[schema(value_type = String)]
    pub id: BookingId,
}

pub(super) fn map_booking_persistence_error(error: BookingPersistenceError) -> ApiError {
    match error {
        BookingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}")).into()
        }
        BookingPersistenceError::Query { message } => {
            Error::internal(format!("booking repository error: {message}")).into()
        }
    }
}

fn booking_not_found() -> ApiError {
    Error::not_found("booking not found").into()
}

fn parse_booking_id(raw: &str) -> Result<BookingId, ApiError> {
    BookingId::new(raw)
        .map_err(|_| Error::invalid_request("booking id must be a valid UUID").into())
}

/// Fetch a booking the caller may read, applying the disclosure policy.
async fn guarded_booking(
    state: &AppState,
    identity: &Identity,
    id: &BookingId,
) -> Result<Booking, ApiError> {
    let booking = state
        .bookings
        .find_by_id(id)
        .await
        .map_err(map_booking_persistence_error)?
        .ok_or_else(booking_not_found)?;

    match authorize_read(identity, &booking) {
        Access::Allow => Ok(booking),
        Access::Deny => {
            warn!(
                booking_id = %booking.id(),
                caller_id = %identity.user_id(),
                "booking read denied"
            );
            Err(booking_not_found())
        }
    }
}

/// List every booking. Requires the administrative capability.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingPayload]),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 403, description = "Administrator access required", body = super::error::ApiError)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<AppState>,
    caller: Authenticated,
) -> ApiResult<web::Json<Vec<BookingPayload>>> {
    caller.require_admin()?;

    let bookings = state
        .bookings
        .list()
        .await
        .map_err(map_booking_persistence_error)?;
    Ok(web::Json(
        bookings.iter().map(BookingPayload::from).collect(),
    ))
}

/// Fetch a booking visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking", body = BookingPayload),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "Booking not found", body = super::error::ApiError)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<AppState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookingPayload>> {
    let id = parse_booking_id(&path)?;
    let booking = guarded_booking(&state, caller.identity(), &id).await?;
    Ok(web::Json(BookingPayload::from(&booking)))
}

/// Cancel a booking visible to the caller.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking canceled", body = CanceledResponse),
        (status = 401, description = "Unauthorised", body = super::error::ApiError),
        (status = 404, description = "Booking not found", body = super::error::ApiError)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[post("/bookings/{id}/cancel")]
pub async fn cancel_booking(
    state: web::Data<AppState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<CanceledResponse>> {
    let id = parse_booking_id(&path)?;
    let booking = guarded_booking(&state, caller.identity(), &id).await?;

    let canceled = state
        .bookings
        .cancel(booking.id())
        .await
        .map_err(map_booking_persistence_error)?;
    if !canceled {
        return Err(booking_not_found());
    }
    Ok(web::Json(CanceledResponse { id }))
}

/// Book a room for the caller.
///
/// Availability and overlap checking are not performed; the stay window is
/// only validated for shape.
#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/book",
    params(("id" = String, Path, description = "Room identifier")),
    request_body = BookRoomParams,
    responses(
        (status = 201, description = "Booking created", body = BookingPayload),
        (status = 400, description = "Invalid stay window", body = super::error::ApiError),
        (status = 401, description = "Unauthorised", body = super::error::ApiError)
    ),
    tags = ["bookings"],
    operation_id = "bookRoom"
)]
#[post("/rooms/{id}/book")]
pub async fn book_room(
    state: web::Data<AppState>,
    caller: Authenticated,
    path: web::Path<String>,
    params: web::Json<BookRoomParams>,
) -> ApiResult<HttpResponse> {
    let room_id = RoomId::new(path.as_str())
        .map_err(|_| ApiError::from(Error::invalid_request("room id must be a valid UUID")))?;

    let params = params.into_inner();
    if params.from_date < Utc::now() {
        return Err(Error::invalid_request("cannot book a stay starting in the past").into());
    }
    let draft = BookingDraft::new(
        *caller.user_id(),
        room_id,
        params.from_date,
        params.till_date,
        params.num_persons,
    )
    .map_err(|err| ApiError::from(Error::invalid_request(err.to_string())))?;

    let booking = state
        .bookings
        .insert(&draft)
        .await
        .map_err(map_booking_persistence_error)?;
    Ok(HttpResponse::Created().json(BookingPayload::from(&booking)))
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage for the guard and disclosure policy.
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test, web};
    use chrono::Duration;
    use serde_json::json;

    use super::*;
    use crate::api::test_support::test_state;
    use crate::domain::UserId;

    fn app_with(
        state: AppState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_bookings)
                .service(get_booking)
                .service(cancel_booking)
                .service(book_room),
        )
    }

    fn seeded_booking(owner: UserId) -> Booking {
        let from = Utc::now() + Duration::days(7);
        Booking::new(
            BookingId::random(),
            owner,
            RoomId::random(),
            from,
            from + Duration::days(2),
            2,
            false,
        )
    }

    #[actix_web::test]
    async fn the_owner_reads_their_booking() {
        let stub = test_state();
        let (owner, token) = stub.register_user("ada@example.com", false);
        let booking = seeded_booking(*owner.id());
        stub.bookings.put(booking.clone());
        let app = test::init_service(app_with(stub.state.clone())).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/bookings/{}", booking.id()))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], booking.id().to_string());
        assert_eq!(body["userId"], owner.id().to_string());
    }

    #[actix_web::test]
    async fn a_non_owner_cannot_distinguish_deny_from_absent() {
        let stub = test_state();
        let (owner, _) = stub.register_user("ada@example.com", false);
        let (_, stranger_token) = stub.register_user("eve@example.com", false);
        let booking = seeded_booking(*owner.id());
        stub.bookings.put(booking.clone());
        let app = test::init_service(app_with(stub.state.clone())).await;

        let denied_req = test::TestRequest::get()
            .uri(&format!("/api/v1/bookings/{}", booking.id()))
            .insert_header((AUTHORIZATION, format!("Bearer {stranger_token}")))
            .to_request();
        let denied = test::call_service(&app, denied_req).await;

        let absent_req = test::TestRequest::get()
            .uri(&format!("/api/v1/bookings/{}", BookingId::random()))
            .insert_header((AUTHORIZATION, format!("Bearer {stranger_token}")))
            .to_request();
        let absent = test::call_service(&app, absent_req).await;

        assert_eq!(denied.status(), StatusCode::NOT_FOUND);
        assert_eq!(absent.status(), StatusCode::NOT_FOUND);
        let denied_body = test::read_body(denied).await;
        let absent_body = test::read_body(absent).await;
        assert_eq!(denied_body, absent_body);
    }

    #[actix_web::test]
    async fn an_administrator_reads_any_booking() {
        let stub = test_state();
        let (owner, _) = stub.register_user("ada@example.com", false);
        let (_, admin_token) = stub.register_user("root@example.com", true);
        let booking = seeded_booking(*owner.id());
        stub.bookings.put(booking.clone());
        let app = test::init_service(app_with(stub.state.clone())).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/bookings/{}", booking.id()))
            .insert_header((AUTHORIZATION, format!("Bearer {admin_token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn the_listing_requires_the_admin_capability() {
        let stub = test_state();
        let (_, token) = stub.register_user("ada@example.com", false);
        let (_, admin_token) = stub.register_user("root@example.com", true);
        let app = test::init_service(app_with(stub.state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/bookings")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/bookings")
            .insert_header((AUTHORIZATION, format!("Bearer {admin_token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn booking_a_room_records_the_caller_as_owner() {
        let stub = test_state();
        let (user, token) = stub.register_user("ada@example.com", false);
        let app = test::init_service(app_with(stub.state.clone())).await;

        let from = Utc::now() + Duration::days(3);
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/rooms/{}/book", RoomId::random()))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .set_json(json!({
                "fromDate": from,
                "tillDate": from + Duration::days(2),
                "numPersons": 2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["userId"], user.id().to_string());
    }

    #[actix_web::test]
    async fn cancelling_marks_the_booking() {
        let stub = test_state();
        let (owner, token) = stub.register_user("ada@example.com", false);
        let booking = seeded_booking(*owner.id());
        stub.bookings.put(booking.clone());
        let app = test::init_service(app_with(stub.state.clone())).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/bookings/{}/cancel", booking.id()))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = stub
            .bookings
            .find_by_id(booking.id())
            .await
            .expect("lookup succeeds")
            .expect("still stored");
        assert!(stored.canceled());
    }
}
