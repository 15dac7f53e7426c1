use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::errors::DisplayNameError;
use crate::domain::identity::errors::EmailError;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::errors::IdentityIdError;
use crate::domain::identity::errors::PasswordPolicyError;

/// Identity aggregate entity.
///
/// A registered forum account. `password_hash` is a PHC string and never
/// leaves the service boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: IdentityId,
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    ///
    /// # Returns
    /// IdentityId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Free text shown next to posts. Never blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid display name.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace-only
    /// * `TooLong` - Longer than 100 characters
    pub fn new(display_name: String) -> Result<Self, DisplayNameError> {
        let trimmed = display_name.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(DisplayNameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Parse an optional display name where blank means "not provided".
    ///
    /// # Errors
    /// * `TooLong` - Provided name exceeds the maximum length
    pub fn optional(display_name: Option<String>) -> Result<Option<Self>, DisplayNameError> {
        match display_name {
            Some(name) if !name.trim().is_empty() => Self::new(name).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is
/// case-sensitive: `Ana@x.com` and `ana@x.com` are different identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Only lives long enough to be hashed. `Debug` output is redacted.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    /// Parse an optional password where blank means "not provided".
    pub fn optional(password: Option<String>) -> Result<Option<Self>, PasswordPolicyError> {
        match password {
            Some(password) if !password.trim().is_empty() => Self::new(password).map(Some),
            _ => Ok(None),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new identity with domain types
#[derive(Debug)]
pub struct CreateIdentityCommand {
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateIdentityCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `display_name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(display_name: DisplayName, email: EmailAddress, password: Password) -> Self {
        Self {
            display_name,
            email,
            password,
        }
    }
}

/// Command to update an existing identity.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateIdentityCommand {
    pub display_name: Option<DisplayName>,
    pub password: Option<Password>,
}

impl UpdateIdentityCommand {
    /// Build an update from raw request fields.
    ///
    /// Blank or whitespace-only values count as "not provided".
    ///
    /// # Errors
    /// * `InvalidDisplayName` - Provided name is too long
    /// * `InvalidPassword` - Provided password violates the policy
    pub fn new(
        display_name: Option<String>,
        password: Option<String>,
    ) -> Result<Self, IdentityError> {
        Ok(Self {
            display_name: DisplayName::optional(display_name)?,
            password: Password::optional(password)?,
        })
    }
}

/// Record handed to the credential store on registration.
///
/// The store assigns the ID and creation time.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub display_name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Partial update applied by the credential store.
///
/// `None` leaves the stored attribute unchanged. A `DisplayName` can never be
/// blank, so a blank name always arrives here as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityChanges {
    pub display_name: Option<DisplayName>,
    pub password_hash: Option<String>,
}

impl IdentityChanges {
    /// Apply the changes to an in-memory identity.
    pub fn apply_to(self, identity: &mut Identity) {
        if let Some(display_name) = self.display_name {
            identity.display_name = display_name;
        }
        if let Some(password_hash) = self.password_hash {
            identity.password_hash = password_hash;
        }
    }
}
