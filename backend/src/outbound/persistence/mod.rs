//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here. The one exception by
//!   design is `DieselRoomRepository::create`, which owns the hotel/room
//!   referential invariant via a single transaction.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: every database failure is mapped to the
//!   owning port's error enum.

mod diesel_booking_repository;
mod diesel_hotel_repository;
mod diesel_room_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_hotel_repository::DieselHotelRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
