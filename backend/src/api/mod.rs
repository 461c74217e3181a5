//! HTTP adapters: handlers, wire payloads, and error mapping.
//!
//! Handlers stay thin: parse the request, call a domain port or service,
//! serialise the result. The caller identity arrives as a typed value via
//! the [`identity::Authenticated`] extractor.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod health;
pub mod hotels;
pub mod identity;
pub mod rooms;
pub mod state;
#[cfg(test)]
pub mod test_support;
pub mod users;

pub use self::error::{ApiError, ApiResult};
pub use self::state::AppState;
