//! User aggregate and its value types.

use std::fmt;

use chrono::{DateTime, Utc};

use super::ids::UserId;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email was blank or structurally invalid.
    InvalidEmail,
    /// First name was blank or too short.
    FirstNameTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
    /// Last name was blank or too short.
    LastNameTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email is invalid"),
            Self::FirstNameTooShort { min } => {
                write!(f, "first name must be at least {min} characters")
            }
            Self::LastNameTooShort { min } => {
                write!(f, "last name must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Minimum accepted length for first and last names.
pub const NAME_MIN: usize = 2;

/// Email address stored and compared exactly as supplied.
///
/// ## Invariants
/// - contains exactly one `@` with a non-empty local part and a domain
///   containing at least one dot.
/// - carries no surrounding whitespace.
///
/// Lookups are case-sensitive against the stored form; no normalisation
/// happens beyond this structural check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`] from string input.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim() != raw || raw.is_empty() {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = raw.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Application user.
///
/// The password hash never leaves the domain: outbound payload types carry
/// every field except it, and [`std::fmt::Debug`] is derived only on the
/// surrounding struct without exposing the hash contents in logs (adapters
/// must not log whole users).
#[derive(Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: Email,
    first_name: String,
    last_name: String,
    password_hash: String,
    admin: bool,
    created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password_hash", &"<redacted>")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

impl User {
    /// Assemble a user from validated components.
    pub fn new(
        id: UserId,
        email: Email,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password_hash: impl Into<String>,
        admin: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.trim().chars().count() < NAME_MIN {
            return Err(UserValidationError::FirstNameTooShort { min: NAME_MIN });
        }
        if last_name.trim().chars().count() < NAME_MIN {
            return Err(UserValidationError::LastNameTooShort { min: NAME_MIN });
        }
        Ok(Self {
            id,
            email,
            first_name,
            last_name,
            password_hash: password_hash.into(),
            admin,
            created_at,
        })
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address as stored.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Stored one-way password hash.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Administrative capability flag.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Record creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn user_with_names(first: &str, last: &str) -> Result<User, UserValidationError> {
        User::new(
            UserId::random(),
            Email::new("ada@example.com").expect("valid email"),
            first,
            last,
            "$2b$12$hash",
            false,
            Utc::now(),
        )
    }

    #[rstest]
    #[case("")]
    #[case("plainaddress")]
    #[case("@no-local.example.com")]
    #[case("no-domain@")]
    #[case("two@@example.com")]
    #[case("no-dot@example")]
    #[case(" padded@example.com")]
    fn rejects_invalid_emails(#[case] raw: &str) {
        assert_eq!(Email::new(raw), Err(UserValidationError::InvalidEmail));
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("Ada.Lovelace@Example.Co.Uk")]
    fn accepts_structural_emails(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw);
    }

    #[rstest]
    fn emails_compare_case_sensitively() {
        let lower = Email::new("ada@example.com").expect("valid");
        let upper = Email::new("Ada@example.com").expect("valid");
        assert_ne!(lower, upper);
    }

    #[rstest]
    #[case("A", "Lovelace")]
    #[case("Ada", "L")]
    fn rejects_short_names(#[case] first: &str, #[case] last: &str) {
        assert!(user_with_names(first, last).is_err());
    }

    #[rstest]
    fn debug_redacts_the_password_hash() {
        let user = user_with_names("Ada", "Lovelace").expect("valid user");
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("$2b$12$hash"));
        assert!(rendered.contains("<redacted>"));
    }
}
