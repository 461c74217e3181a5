//! Booking read authorization.
//!
//! A booking is visible to its owner and to administrators; nobody else.
//! The capability flag is checked before the ownership equality so the admin
//! bypass is part of this guard rather than a duplicated code path. How a
//! denial is surfaced to the wire is an adapter policy decision; this guard
//! only decides.

use super::booking::Booking;
use super::token::Identity;

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The caller may read the booking.
    Allow,
    /// The caller is authenticated but not permitted to read the booking.
    Deny,
}

impl Access {
    /// Whether the decision permits the read.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `identity` may read `booking`.
pub fn authorize_read(identity: &Identity, booking: &Booking) -> Access {
    if identity.is_admin() || booking.user_id() == identity.user_id() {
        Access::Allow
    } else {
        Access::Deny
    }
}

#[cfg(test)]
mod tests {
    //! Exhaustive owner/non-owner/admin coverage.
    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::ids::{BookingId, RoomId, UserId};
    use crate::domain::user::Email;

    fn booking_owned_by(owner: UserId) -> Booking {
        let from = Utc::now();
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

    fn identity(user_id: UserId, admin: bool) -> Identity {
        Identity::new(
            user_id,
            Email::new("caller@example.com").expect("valid email"),
            admin,
        )
    }

    #[rstest]
    fn the_owner_may_read() {
        let owner = UserId::random();
        let booking = booking_owned_by(owner);
        assert_eq!(
            authorize_read(&identity(owner, false), &booking),
            Access::Allow
        );
    }

    #[rstest]
    fn a_stranger_may_not_read() {
        let booking = booking_owned_by(UserId::random());
        let decision = authorize_read(&identity(UserId::random(), false), &booking);
        assert_eq!(decision, Access::Deny);
        assert!(!decision.is_allowed());
    }

    #[rstest]
    fn an_administrator_bypasses_ownership() {
        let booking = booking_owned_by(UserId::random());
        assert_eq!(
            authorize_read(&identity(UserId::random(), true), &booking),
            Access::Allow
        );
    }
}
