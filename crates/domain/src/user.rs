//! User domain types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storerate_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::record::{Record, ToRecord};

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid user id '{value}': {error}")))
    }
}

/// Canonical (trimmed, lower-cased) email address.
///
/// Format rules live in the form rule tables; this type only guarantees a
/// stable comparison key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a canonical email address.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let canonical = value.into().trim().to_lowercase();
        if canonical.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        if !canonical.contains('@') {
            return Err(AppError::Validation(
                "email address must contain '@'".to_owned(),
            ));
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Account role deciding which dashboards a user may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System administrator managing users and stores.
    Admin,
    /// Regular user rating stores.
    #[default]
    User,
    /// Store owner reviewing ratings of their store.
    Owner,
}

impl Role {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Owner => "owner",
        }
    }

    /// Returns the capitalized label shown in tables.
    #[must_use]
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
            Self::Owner => "Owner",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "owner" => Ok(Self::Owner),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: NonEmptyString,
    email: EmailAddress,
    address: NonEmptyString,
    role: Role,
}

impl User {
    /// Creates a user with validated fields.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        role: Role,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            email: EmailAddress::new(email)?,
            address: NonEmptyString::new(address)?,
            role,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the full name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the canonical email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Returns the account role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

impl ToRecord for User {
    fn to_record(&self) -> Record {
        Record::new()
            .with(Record::ID_FIELD, self.id.to_string())
            .with("name", self.name())
            .with("email", self.email.as_str())
            .with("address", self.address())
            .with("role", self.role.as_str())
    }
}
