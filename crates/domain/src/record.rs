use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell value of a table record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value, compared numerically.
    Number(f64),
    /// Calendar date, compared chronologically.
    Date(NaiveDate),
    /// Free text, compared with locale-aware ordering.
    Text(String),
}

impl FieldValue {
    /// Returns the lower-cased string form used for search matching.
    #[must_use]
    pub fn search_text(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Returns the numeric value when this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text value when this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // Whole numbers render without a trailing ".0", matching how ratings are shown.
            Self::Number(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(formatter, "{value:.0}")
            }
            Self::Number(value) => write!(formatter, "{value}"),
            Self::Date(value) => write!(formatter, "{}", value.format("%Y-%m-%d")),
            Self::Text(value) => formatter.write_str(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        // Ratings and counts stay far below 2^53.
        Self::Number(value as f64)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// A row of domain data rendered in a table.
///
/// Records are keyed by field name. Entity records carry a stable `id`
/// field used by callers for list diffing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    /// Field name of the stable record key.
    pub const ID_FIELD: &'static str = "id";

    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the record with one more field set.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field value, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Returns the string form of the `id` field.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.get(Self::ID_FIELD).map(ToString::to_string)
    }

    /// Returns field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// Projection of a domain entity into a table record.
pub trait ToRecord {
    /// Builds the record rendered for this entity.
    fn to_record(&self) -> Record;
}

impl ToRecord for Record {
    fn to_record(&self) -> Record {
        self.clone()
    }
}
