use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storerate_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::user::{EmailAddress, UserId};

/// Unique identifier for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreId(Uuid);

impl StoreId {
    /// Creates a new random store identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a store identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid store id '{value}': {error}")))
    }
}

/// A rated store listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    id: StoreId,
    name: NonEmptyString,
    email: EmailAddress,
    address: NonEmptyString,
    owner_id: Option<UserId>,
}

impl Store {
    /// Creates a store with validated fields.
    pub fn new(
        id: StoreId,
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        owner_id: Option<UserId>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            email: EmailAddress::new(email)?,
            address: NonEmptyString::new(address)?,
            owner_id,
        })
    }

    /// Returns the store identifier.
    #[must_use]
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Returns the store name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Returns the owning user, if one is assigned.
    #[must_use]
    pub fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    /// Returns this store assigned to a different owner.
    #[must_use]
    pub fn with_owner(self, owner_id: Option<UserId>) -> Self {
        Self { owner_id, ..self }
    }
}
