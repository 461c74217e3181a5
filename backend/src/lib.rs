//! Reservation-booking backend: users, hotels, rooms, and bookings behind a
//! JSON HTTP API.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, ports, and
//! the access & referential-integrity core; `api` holds the Actix HTTP
//! adapters; `outbound` holds the Diesel persistence adapters; `server`
//! wires them together.

pub mod api;
pub mod doc;
pub mod domain;
pub mod outbound;
pub mod server;
