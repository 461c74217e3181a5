//! Password hashing and verification.
//!
//! Verification is a pure predicate over the stored hash and the supplied
//! plaintext. The bcrypt primitive performs its comparison in constant time;
//! a malformed stored hash verifies as `false` rather than erroring, so a
//! corrupted record can never be treated as "no password required". Neither
//! function logs or returns the plaintext or the hash.

use std::fmt;

use zeroize::Zeroizing;

/// Work factor applied when hashing new passwords.
pub const HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash used to equalise the timing envelope of lookups that find no user.
///
/// A syntactically valid bcrypt hash that matches no password we ever issue;
/// verifying against it costs the same work factor as a real comparison.
const DUMMY_HASH: &str = "$2b$12$abcdefghijklmnopqrstuvabcdefghijklmnopqrstuvwxyzABCDE";

/// Error returned when hashing fails (effectively unreachable for valid
/// cost parameters; surfaced rather than panicking).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashError {
    message: String,
}

impl fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "password hashing failed: {}", self.message)
    }
}

impl std::error::Error for PasswordHashError {}

/// Hash a plaintext password for storage.
pub fn hash(plaintext: &str) -> Result<String, PasswordHashError> {
    let plaintext = Zeroizing::new(plaintext.to_owned());
    bcrypt::hash(plaintext.as_str(), HASH_COST).map_err(|err| PasswordHashError {
        message: err.to_string(),
    })
}

/// Compare a plaintext password against a stored hash.
///
/// Returns `false` for any mismatch, including a malformed stored hash.
pub fn verify(stored_hash: &str, supplied_plaintext: &str) -> bool {
    bcrypt::verify(supplied_plaintext, stored_hash).unwrap_or(false)
}

/// Burn one bcrypt verification against a throwaway hash.
///
/// Called on the no-such-user path so its timing envelope tracks the
/// wrong-password path as far as practical.
pub fn burn_verification(supplied_plaintext: &str) {
    let _ = verify(DUMMY_HASH, supplied_plaintext);
}
