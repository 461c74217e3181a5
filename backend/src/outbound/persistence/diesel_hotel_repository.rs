//! PostgreSQL-backed `HotelRepository` implementation using Diesel.
//!
//! Read-only: the hotels table's room set is mutated exclusively by the
//! referential room create in `DieselRoomRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{HotelPersistenceError, HotelRepository};
use crate::domain::{Hotel, HotelId, RoomId};

use super::models::HotelRow;
use super::pool::{DbPool, PoolError};
use super::schema::hotels;

/// Diesel-backed implementation of the `HotelRepository` port.
#[derive(Clone)]
pub struct DieselHotelRepository {
    pool: DbPool,
}

impl DieselHotelRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HotelPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            HotelPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> HotelPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            HotelPersistenceError::connection("database connection error")
        }
        _ => HotelPersistenceError::query("database error"),
    }
}

fn row_to_hotel(row: HotelRow) -> Result<Hotel, HotelPersistenceError> {
    let rooms = row.rooms.into_iter().map(RoomId::from_uuid).collect();
    Hotel::new(
        HotelId::from_uuid(row.id),
        row.name,
        row.location,
        row.rating,
        rooms,
    )
    .map_err(|err| HotelPersistenceError::query(format!("stored hotel invalid: {err}")))
}

#[async_trait]
impl HotelRepository for DieselHotelRepository {
    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<HotelRow> = hotels::table
            .find(id.as_uuid())
            .select(HotelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_hotel).transpose()
    }

    async fn list(&self, min_rating: Option<i32>) -> Result<Vec<Hotel>, HotelPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = hotels::table
            .select(HotelRow::as_select())
            .into_boxed();
        if let Some(min) = min_rating {
            query = query.filter(hotels::rating.ge(min));
        }

        let rows: Vec<HotelRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_hotel).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage for this module.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn rows_convert_with_their_room_sets() {
        let room_a = Uuid::new_v4();
        let room_b = Uuid::new_v4();
        let row = HotelRow {
            id: Uuid::new_v4(),
            name: "Bellavista".into(),
            location: "Novigrad".into(),
            rating: 4,
            rooms: vec![room_a, room_b],
        };

        let hotel = row_to_hotel(row).expect("valid row converts");
        assert_eq!(hotel.rooms().len(), 2);
        assert!(hotel.owns_room(&RoomId::from_uuid(room_a)));
    }

    #[rstest]
    fn out_of_range_ratings_surface_as_query_errors() {
        let row = HotelRow {
            id: Uuid::new_v4(),
            name: "Bellavista".into(),
            location: "Novigrad".into(),
            rating: 11,
            rooms: vec![],
        };

        let err = row_to_hotel(row).expect_err("corrupt row must fail");
        assert!(matches!(err, HotelPersistenceError::Query { .. }));
    }
}
