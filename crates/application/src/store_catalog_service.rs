//! Store listing and rating submission for signed-in users.

use std::sync::Arc;

use tracing::{debug, info};

use storerate_core::{AppError, AppResult};
use storerate_domain::{Rating, RatingValue, StoreId};

use crate::store_listing::build_listings;
use crate::{Clock, RatingRepository, SessionContext, StoreListing, StoreRepository, TableState};

/// Application service behind the store listing screen.
#[derive(Clone)]
pub struct StoreCatalogService {
    store_repository: Arc<dyn StoreRepository>,
    rating_repository: Arc<dyn RatingRepository>,
    clock: Arc<dyn Clock>,
}

impl StoreCatalogService {
    /// Creates a new store catalog service.
    #[must_use]
    pub fn new(
        store_repository: Arc<dyn StoreRepository>,
        rating_repository: Arc<dyn RatingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store_repository,
            rating_repository,
            clock,
        }
    }

    /// Lists stores with their average rating and the session user's own
    /// rating, filtered and sorted by `table`.
    pub async fn list_stores(
        &self,
        session: &SessionContext,
        table: &TableState,
    ) -> AppResult<Vec<StoreListing>> {
        let stores = self.store_repository.list_stores().await?;
        let ratings = self.rating_repository.list_ratings().await?;
        let listings = build_listings(stores, &ratings, Some(session.user_id()));

        let rows = table.render(&listings);
        debug!(
            total = listings.len(),
            shown = rows.len(),
            query = table.query().as_str(),
            "rendered store listing"
        );
        Ok(rows)
    }

    /// Records the session user's rating of a store.
    ///
    /// A user holds at most one rating per store; submitting again replaces
    /// the value and moves the date to today.
    pub async fn submit_rating(
        &self,
        session: &SessionContext,
        store_id: StoreId,
        value: u8,
    ) -> AppResult<Rating> {
        let value = RatingValue::new(value)?;
        if self.store_repository.find_store(store_id).await?.is_none() {
            return Err(AppError::NotFound(format!("store '{store_id}' not found")));
        }

        let rating = self
            .rating_repository
            .upsert_rating(store_id, session.user_id(), value, self.clock.today())
            .await?;

        info!(
            store_id = %store_id,
            user_id = %session.user_id(),
            rating = value.get(),
            "submitted store rating"
        );
        Ok(rating)
    }
}
