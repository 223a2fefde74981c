use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use storerate_core::{AppError, AppResult};
use uuid::Uuid;

use crate::store::StoreId;
use crate::user::UserId;

/// Unique identifier for a submitted rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingId(Uuid);

impl RatingId {
    /// Creates a new random rating identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RatingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RatingId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Star value of a rating, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingValue(u8);

impl RatingValue {
    /// Lowest accepted star value.
    pub const MIN: u8 = 1;
    /// Highest accepted star value.
    pub const MAX: u8 = 5;

    /// Creates a validated star value.
    pub fn new(value: u8) -> AppResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(AppError::Validation(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }

        Ok(Self(value))
    }

    /// Returns the star count.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

/// One user's rating of one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    id: RatingId,
    store_id: StoreId,
    user_id: UserId,
    value: RatingValue,
    submitted_on: NaiveDate,
}

impl Rating {
    /// Creates a rating.
    #[must_use]
    pub fn new(
        id: RatingId,
        store_id: StoreId,
        user_id: UserId,
        value: RatingValue,
        submitted_on: NaiveDate,
    ) -> Self {
        Self {
            id,
            store_id,
            user_id,
            value,
            submitted_on,
        }
    }

    /// Returns the rating identifier.
    #[must_use]
    pub fn id(&self) -> RatingId {
        self.id
    }

    /// Returns the rated store.
    #[must_use]
    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    /// Returns the rating user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the star value.
    #[must_use]
    pub fn value(&self) -> RatingValue {
        self.value
    }

    /// Returns the day the rating was last submitted.
    #[must_use]
    pub fn submitted_on(&self) -> NaiveDate {
        self.submitted_on
    }

    /// Returns this rating with a new value and submission day.
    #[must_use]
    pub fn resubmitted(self, value: RatingValue, submitted_on: NaiveDate) -> Self {
        Self {
            value,
            submitted_on,
            ..self
        }
    }
}

/// Aggregate of the ratings received by one store.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean star value rounded to one decimal; zero when unrated.
    pub average_rating: f64,
    /// Number of ratings received.
    pub total_ratings: usize,
}

impl RatingSummary {
    /// Summarizes a set of star values.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = RatingValue>) -> Self {
        let (sum, total) = values
            .into_iter()
            .fold((0_u64, 0_usize), |(sum, total), value| {
                (sum + u64::from(value.get()), total + 1)
            });

        if total == 0 {
            return Self::default();
        }

        let average = sum as f64 / total as f64;
        Self {
            average_rating: (average * 10.0).round() / 10.0,
            total_ratings: total,
        }
    }
}

/// Share of one star value among a store's ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarShare {
    /// Star value, 1 to 5.
    pub stars: u8,
    /// Ratings with exactly this value.
    pub count: usize,
    /// `count` as a percentage of all ratings; zero when unrated.
    pub percentage: f64,
}

impl StarShare {
    /// Counts each star value from 5 down to 1.
    ///
    /// Always returns five entries, so an unrated store still lists every
    /// star with a zero count.
    #[must_use]
    pub fn distribution(values: impl IntoIterator<Item = RatingValue>) -> Vec<Self> {
        let mut counts = [0_usize; RatingValue::MAX as usize];
        for value in values {
            counts[usize::from(value.get()) - 1] += 1;
        }
        let total: usize = counts.iter().sum();

        (RatingValue::MIN..=RatingValue::MAX)
            .rev()
            .map(|stars| {
                let count = counts[usize::from(stars) - 1];
                let percentage = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                Self {
                    stars,
                    count,
                    percentage,
                }
            })
            .collect()
    }
}
