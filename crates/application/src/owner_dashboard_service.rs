//! Owner dashboard: one store's rating summary and rating table.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use storerate_core::{AppError, AppResult};
use storerate_domain::{
    RatingId, RatingSummary, Record, Role, StarShare, ToRecord, User, UserId,
};

use crate::{RatingRepository, SessionContext, StoreRepository, TableState, UserRepository};

/// One rating row of the owner dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRatingRow {
    /// Rating identifier.
    pub id: RatingId,
    /// Name of the rating user.
    pub user_name: String,
    /// Email of the rating user.
    pub user_email: String,
    /// Star value.
    pub rating: u8,
    /// Submission day.
    pub date: NaiveDate,
}

impl ToRecord for OwnerRatingRow {
    fn to_record(&self) -> Record {
        Record::new()
            .with(Record::ID_FIELD, self.id.to_string())
            .with("userName", self.user_name.as_str())
            .with("userEmail", self.user_email.as_str())
            .with("rating", self.rating)
            .with("date", self.date)
    }
}

/// Summary of the store owned by the session user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboard {
    /// Name of the owned store.
    pub store_name: String,
    /// Average star value, one decimal.
    pub average_rating: f64,
    /// Number of ratings received.
    pub total_ratings: usize,
    /// Count and share of each star value from 5 down to 1.
    pub distribution: Vec<StarShare>,
    /// Rating rows after search and sort.
    pub ratings: Vec<OwnerRatingRow>,
}

/// Application service for store owners.
#[derive(Clone)]
pub struct OwnerDashboardService {
    user_repository: Arc<dyn UserRepository>,
    store_repository: Arc<dyn StoreRepository>,
    rating_repository: Arc<dyn RatingRepository>,
}

impl OwnerDashboardService {
    /// Creates a new owner dashboard service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        store_repository: Arc<dyn StoreRepository>,
        rating_repository: Arc<dyn RatingRepository>,
    ) -> Self {
        Self {
            user_repository,
            store_repository,
            rating_repository,
        }
    }

    /// Builds the dashboard of the session owner's store.
    ///
    /// Totals and the star distribution cover every rating; `table` only
    /// shapes the listed rows.
    pub async fn summary(
        &self,
        session: &SessionContext,
        table: &TableState,
    ) -> AppResult<OwnerDashboard> {
        session.require_role(Role::Owner)?;
        let store = self
            .store_repository
            .find_store_by_owner(session.user_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no store is assigned to owner '{}'",
                    session.user_id()
                ))
            })?;

        let ratings = self
            .rating_repository
            .list_ratings_for_store(store.id())
            .await?;
        let summary = RatingSummary::from_values(ratings.iter().map(|rating| rating.value()));
        let distribution = StarShare::distribution(ratings.iter().map(|rating| rating.value()));

        let users: HashMap<UserId, User> = self
            .user_repository
            .list_users()
            .await?
            .into_iter()
            .map(|user| (user.id(), user))
            .collect();

        let rows: Vec<OwnerRatingRow> = ratings
            .iter()
            .filter_map(|rating| {
                let Some(user) = users.get(&rating.user_id()) else {
                    warn!(
                        rating_id = %rating.id(),
                        user_id = %rating.user_id(),
                        "rating references unknown user"
                    );
                    return None;
                };
                Some(OwnerRatingRow {
                    id: rating.id(),
                    user_name: user.name().to_owned(),
                    user_email: user.email().as_str().to_owned(),
                    rating: rating.value().get(),
                    date: rating.submitted_on(),
                })
            })
            .collect();

        let rows = table.render(&rows);
        debug!(
            store_id = %store.id(),
            total = summary.total_ratings,
            shown = rows.len(),
            "rendered owner dashboard"
        );

        Ok(OwnerDashboard {
            store_name: store.name().to_owned(),
            average_rating: summary.average_rating,
            total_ratings: summary.total_ratings,
            distribution,
            ratings: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use storerate_core::AppError;
    use storerate_domain::Role;

    use super::OwnerDashboardService;
    use crate::test_support::{Fixture, date};
    use crate::{SessionContext, TablePreset, TableState};

    fn service(fixture: &Fixture) -> OwnerDashboardService {
        OwnerDashboardService::new(
            fixture.users.clone(),
            fixture.stores.clone(),
            fixture.ratings.clone(),
        )
    }

    fn owner_table() -> TableState {
        TableState::for_preset(TablePreset::OwnerRatings)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    #[tokio::test]
    async fn summary_lists_newest_ratings_first() {
        let fixture = Fixture::default();
        let owner = fixture
            .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
            .await;
        let jane = fixture
            .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
            .await;
        let john = fixture
            .add_user("John Customer Wilson", "john@example.com", Role::User)
            .await;
        let store = fixture
            .add_store("Electronics Store", "electronics@example.com", Some(&owner))
            .await;
        let other = fixture.add_store("Book Haven", "books@example.com", None).await;
        fixture.add_rating(&store, &jane, 5, 15).await;
        fixture.add_rating(&store, &john, 4, 20).await;
        fixture.add_rating(&other, &john, 1, 21).await;

        let dashboard = service(&fixture)
            .summary(&SessionContext::new(owner.id(), owner.role()), &owner_table())
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(dashboard.store_name, "Electronics Store");
        assert_eq!(dashboard.total_ratings, 2);
        assert!((dashboard.average_rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(dashboard.ratings.len(), 2);
        assert_eq!(dashboard.ratings[0].user_email, "john@example.com");
        assert_eq!(dashboard.ratings[0].date, date(2024, 1, 20));
    }

    #[tokio::test]
    async fn search_narrows_rows_but_not_totals() {
        let fixture = Fixture::default();
        let owner = fixture
            .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
            .await;
        let jane = fixture
            .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
            .await;
        let john = fixture
            .add_user("John Customer Wilson", "john@example.com", Role::User)
            .await;
        let store = fixture
            .add_store("Electronics Store", "electronics@example.com", Some(&owner))
            .await;
        fixture.add_rating(&store, &jane, 5, 15).await;
        fixture.add_rating(&store, &john, 4, 20).await;

        let mut table = owner_table();
        table.set_query("JANE");
        let dashboard = service(&fixture)
            .summary(&SessionContext::new(owner.id(), owner.role()), &table)
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(dashboard.total_ratings, 2);
        assert_eq!(dashboard.ratings.len(), 1);
        assert_eq!(dashboard.ratings[0].user_name, "Jane Customer Smith Doe");

        let counts: Vec<usize> = dashboard.distribution.iter().map(|share| share.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 0]);
        assert!((dashboard.distribution[0].percentage - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unrated_store_lists_empty_distribution() {
        let fixture = Fixture::default();
        let owner = fixture
            .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
            .await;
        fixture
            .add_store("Electronics Store", "electronics@example.com", Some(&owner))
            .await;

        let dashboard = service(&fixture)
            .summary(&SessionContext::new(owner.id(), owner.role()), &owner_table())
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(dashboard.total_ratings, 0);
        assert!(dashboard.average_rating.abs() < f64::EPSILON);
        let stars: Vec<u8> = dashboard.distribution.iter().map(|share| share.stars).collect();
        assert_eq!(stars, vec![5, 4, 3, 2, 1]);
        assert!(
            dashboard
                .distribution
                .iter()
                .all(|share| share.count == 0 && share.percentage.abs() < f64::EPSILON)
        );
    }

    #[tokio::test]
    async fn owner_without_store_is_not_found() {
        let fixture = Fixture::default();
        let owner = fixture
            .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
            .await;

        let result = service(&fixture)
            .summary(&SessionContext::new(owner.id(), owner.role()), &owner_table())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn regular_users_are_forbidden() {
        let fixture = Fixture::default();
        let user = fixture
            .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
            .await;

        let result = service(&fixture)
            .summary(&SessionContext::new(user.id(), user.role()), &owner_table())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
