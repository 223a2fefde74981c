use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storerate_core::{AppError, AppResult, NonEmptyString};

use crate::record::Record;

/// Sort direction for a table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::Validation(format!(
                "unknown sort direction '{value}'"
            ))),
        }
    }
}

/// Active sort field and direction for a table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    field: NonEmptyString,
    direction: SortDirection,
}

impl SortSpec {
    /// Creates a validated sort definition.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> AppResult<Self> {
        Ok(Self {
            field: NonEmptyString::new(field)?,
            direction,
        })
    }

    /// Creates an ascending sort on the given field.
    pub fn ascending(field: impl Into<String>) -> AppResult<Self> {
        Self::new(field, SortDirection::Asc)
    }

    /// Returns the sort that results from clicking the header of `field`.
    ///
    /// The active field flips direction; any other field starts ascending.
    pub fn toggled(&self, field: &str) -> AppResult<Self> {
        if self.field.as_str() == field {
            return Ok(Self {
                field: self.field.clone(),
                direction: self.direction.reversed(),
            });
        }

        Self::ascending(field)
    }

    /// Returns the sorted field name.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Free-text search term applied to a table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a search query. Empty text matches everything.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the query matches every record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether any searched field of `record` contains the query,
    /// ignoring case.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, record: &Record, search_fields: &[S]) -> bool {
        if self.is_empty() {
            return true;
        }

        let needle = self.0.to_lowercase();
        search_fields.iter().any(|field| {
            record
                .get(field.as_ref())
                .is_some_and(|value| value.search_text().contains(needle.as_str()))
        })
    }
}
