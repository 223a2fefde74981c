use std::collections::HashMap;

use serde::Serialize;
use storerate_domain::{
    Rating, RatingSummary, RatingValue, Record, Store, StoreId, ToRecord, UserId,
};

/// Store row shown in the store listing and the admin stores tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListing {
    /// Store identifier.
    pub id: StoreId,
    /// Store name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Average star value, one decimal, zero when unrated.
    pub rating: f64,
    /// Number of ratings received.
    pub total_ratings: usize,
    /// Star value the viewing user gave, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
}

impl ToRecord for StoreListing {
    fn to_record(&self) -> Record {
        let mut record = Record::new()
            .with(Record::ID_FIELD, self.id.to_string())
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("address", self.address.as_str())
            .with("rating", self.rating)
            .with(
                "totalRatings",
                i64::try_from(self.total_ratings).unwrap_or(i64::MAX),
            );
        if let Some(user_rating) = self.user_rating {
            record.insert("userRating", user_rating);
        }
        record
    }
}

/// Joins stores with their ratings. `viewer` selects whose own rating is
/// reported.
pub(crate) fn build_listings(
    stores: Vec<Store>,
    ratings: &[Rating],
    viewer: Option<UserId>,
) -> Vec<StoreListing> {
    let mut values_by_store: HashMap<StoreId, Vec<RatingValue>> = HashMap::new();
    let mut viewer_ratings: HashMap<StoreId, u8> = HashMap::new();
    for rating in ratings {
        values_by_store
            .entry(rating.store_id())
            .or_default()
            .push(rating.value());
        if viewer == Some(rating.user_id()) {
            viewer_ratings.insert(rating.store_id(), rating.value().get());
        }
    }

    stores
        .into_iter()
        .map(|store| {
            let summary = values_by_store
                .remove(&store.id())
                .map(RatingSummary::from_values)
                .unwrap_or_default();
            StoreListing {
                id: store.id(),
                name: store.name().to_owned(),
                email: store.email().as_str().to_owned(),
                address: store.address().to_owned(),
                rating: summary.average_rating,
                total_ratings: summary.total_ratings,
                user_rating: viewer_ratings.get(&store.id()).copied(),
            }
        })
        .collect()
}
