use async_trait::async_trait;
use chrono::NaiveDate;
use storerate_application::RatingRepository;
use storerate_core::AppResult;
use storerate_domain::{Rating, RatingId, RatingValue, StoreId, UserId};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory rating repository keeping insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    ratings: RwLock<Vec<Rating>>,
}

impl InMemoryRatingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `ratings`.
    #[must_use]
    pub fn with_ratings(ratings: Vec<Rating>) -> Self {
        Self {
            ratings: RwLock::new(ratings),
        }
    }

    async fn delete_where(&self, predicate: impl Fn(&Rating) -> bool) -> usize {
        let mut ratings = self.ratings.write().await;
        let before = ratings.len();
        ratings.retain(|rating| !predicate(rating));
        before - ratings.len()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn list_ratings(&self) -> AppResult<Vec<Rating>> {
        Ok(self.ratings.read().await.clone())
    }

    async fn list_ratings_for_store(&self, store_id: StoreId) -> AppResult<Vec<Rating>> {
        Ok(self
            .ratings
            .read()
            .await
            .iter()
            .filter(|rating| rating.store_id() == store_id)
            .cloned()
            .collect())
    }

    async fn upsert_rating(
        &self,
        store_id: StoreId,
        user_id: UserId,
        value: RatingValue,
        submitted_on: NaiveDate,
    ) -> AppResult<Rating> {
        let mut ratings = self.ratings.write().await;
        if let Some(existing) = ratings
            .iter_mut()
            .find(|rating| rating.store_id() == store_id && rating.user_id() == user_id)
        {
            debug!(rating_id = %existing.id(), "replacing stored rating");
            *existing = existing.clone().resubmitted(value, submitted_on);
            return Ok(existing.clone());
        }

        let rating = Rating::new(RatingId::new(), store_id, user_id, value, submitted_on);
        ratings.push(rating.clone());
        Ok(rating)
    }

    async fn delete_ratings_for_store(&self, store_id: StoreId) -> AppResult<usize> {
        Ok(self
            .delete_where(|rating| rating.store_id() == store_id)
            .await)
    }

    async fn delete_ratings_for_user(&self, user_id: UserId) -> AppResult<usize> {
        Ok(self.delete_where(|rating| rating.user_id() == user_id).await)
    }
}
