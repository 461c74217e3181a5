//! PostgreSQL-backed `BookingRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{BookingPersistenceError, BookingRepository};
use crate::domain::{Booking, BookingDraft, BookingId, RoomId, UserId};

use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the `BookingRepository` port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            BookingPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> BookingPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            BookingPersistenceError::connection("database connection error")
        }
        _ => BookingPersistenceError::query("database error"),
    }
}

fn row_to_booking(row: BookingRow) -> Booking {
    Booking::new(
        BookingId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        RoomId::from_uuid(row.room_id),
        row.from_date,
        row.till_date,
        row.num_persons,
        row.canceled,
    )
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, draft: &BookingDraft) -> Result<Booking, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewBookingRow {
            id: Uuid::new_v4(),
            user_id: *draft.user_id().as_uuid(),
            room_id: *draft.room_id().as_uuid(),
            from_date: draft.from_date(),
            till_date: draft.till_date(),
            num_persons: draft.num_persons(),
            canceled: false,
        };

        let stored: BookingRow = diesel::insert_into(bookings::table)
            .values(&row)
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_booking(stored))
    }

    async fn find_by_id(
        &self,
        id: &BookingId,
    ) -> Result<Option<Booking>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookingRow> = bookings::table
            .find(id.as_uuid())
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_booking))
    }

    async fn list(&self) -> Result<Vec<Booking>, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_booking).collect())
    }

    async fn cancel(&self, id: &BookingId) -> Result<bool, BookingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(bookings::table.find(id.as_uuid()))
            .set(bookings::canceled.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated_rows > 0)
    }
}
