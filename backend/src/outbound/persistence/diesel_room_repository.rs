//! PostgreSQL-backed `RoomRepository`: the referential room store.
//!
//! `create` runs the room insert and the hotel room-set append inside one
//! transaction, so the two records can never commit disagreeing. The append
//! itself is an atomic SQL-level `array_append` guarded by a containment
//! check rather than a read-modify-write: concurrent creators against the
//! same hotel each append their own id under row-level locking, and a retry
//! can never append the same id twice.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RoomPersistenceError, RoomRepository};
use crate::domain::{HotelId, Room, RoomDraft, RoomId, RoomSize};

use super::models::{NewRoomRow, RoomRow};
use super::pool::{DbPool, PoolError};
use super::schema::{hotels, rooms};

diesel::define_sql_function! {
    /// PostgreSQL `array_append`.
    fn array_append(
        array: diesel::sql_types::Array<diesel::sql_types::Uuid>,
        element: diesel::sql_types::Uuid,
    ) -> diesel::sql_types::Array<diesel::sql_types::Uuid>;
}

/// Diesel-backed implementation of the `RoomRepository` port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoomPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RoomPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> RoomPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RoomPersistenceError::connection("database connection error")
        }
        _ => RoomPersistenceError::query("database error"),
    }
}

// Required by the transaction combinator; errors classified explicitly at
// each statement take precedence over this fallback.
impl From<DieselError> for RoomPersistenceError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

fn row_to_room(row: RoomRow) -> Result<Room, RoomPersistenceError> {
    let size = RoomSize::parse(&row.size)
        .map_err(|err| RoomPersistenceError::query(format!("stored room invalid: {err}")))?;
    Ok(Room::new(
        RoomId::from_uuid(row.id),
        HotelId::from_uuid(row.hotel_id),
        size,
        row.seaside,
        row.price,
    ))
}

/// Append `room_id` to the hotel's room set unless already present.
///
/// Returns the number of rows touched: zero either when the hotel is gone
/// or when the id is already a member.
async fn append_room_id(
    conn: &mut diesel_async::AsyncPgConnection,
    hotel_id: Uuid,
    room_id: Uuid,
) -> Result<usize, DieselError> {
    diesel::update(
        hotels::table
            .find(hotel_id)
            .filter(diesel::dsl::not(hotels::rooms.contains(vec![room_id]))),
    )
    .set(hotels::rooms.eq(array_append(hotels::rooms, room_id)))
    .execute(conn)
    .await
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn create(&self, draft: &RoomDraft) -> Result<Room, RoomPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let hotel_id = *draft.hotel_id().as_uuid();
        let row = NewRoomRow {
            id: Uuid::new_v4(),
            hotel_id,
            size: draft.size().as_str(),
            seaside: draft.seaside(),
            price: draft.price(),
        };
        let missing = RoomPersistenceError::hotel_missing(*draft.hotel_id());

        let stored = conn
            .transaction::<RoomRow, RoomPersistenceError, _>(|conn| {
                async move {
                    let hotel_present: Option<Uuid> = hotels::table
                        .find(hotel_id)
                        .select(hotels::id)
                        .first(conn)
                        .await
                        .optional()
                        .map_err(map_diesel_error)?;
                    if hotel_present.is_none() {
                        return Err(missing.clone());
                    }

                    let stored: RoomRow = diesel::insert_into(rooms::table)
                        .values(&row)
                        .returning(RoomRow::as_returning())
                        .get_result(conn)
                        .await
                        .map_err(map_diesel_error)?;

                    let appended = append_room_id(conn, hotel_id, stored.id)
                        .await
                        .map_err(|err| {
                            RoomPersistenceError::integrity(format!(
                                "appending room {} to hotel {hotel_id} failed: {err}",
                                stored.id
                            ))
                        })?;

                    if appended == 0 {
                        // Zero rows means the hotel vanished concurrently or
                        // the id is already a member (a retried append).
                        let still_present: Option<Uuid> = hotels::table
                            .find(hotel_id)
                            .select(hotels::id)
                            .first(conn)
                            .await
                            .optional()
                            .map_err(map_diesel_error)?;
                        if still_present.is_none() {
                            return Err(missing);
                        }
                    }

                    Ok(stored)
                }
                .scope_boxed()
            })
            .await?;

        row_to_room(stored)
    }

    async fn list(&self) -> Result<Vec<Room>, RoomPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoomRow> = rooms::table
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_room).collect()
    }

    async fn list_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Vec<Room>, RoomPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoomRow> = rooms::table
            .filter(rooms::hotel_id.eq(hotel_id.as_uuid()))
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_room).collect()
    }
}
