//! Repository ports for users, stores and ratings.
//!
//! Listing methods return entities in insertion order so that table views
//! built on top of them have a stable input order.

use async_trait::async_trait;
use chrono::NaiveDate;

use storerate_core::AppResult;
use storerate_domain::{EmailAddress, Rating, RatingValue, Store, StoreId, User, UserId};

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every user.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Finds a user by identifier.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>>;

    /// Finds a user by canonical email.
    async fn find_user_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>>;

    /// Inserts a new user.
    ///
    /// The email check and the insert happen under one write, so two
    /// concurrent registrations of one email yield one
    /// [`AppError::Conflict`](storerate_core::AppError::Conflict).
    async fn create_user(&self, user: User) -> AppResult<()>;

    /// Replaces the stored user with the same identifier.
    ///
    /// Fails with `NotFound` when the user is gone and with `Conflict` when
    /// another user holds the email.
    async fn update_user(&self, user: User) -> AppResult<()>;

    /// Deletes a user. Returns whether a user was removed.
    async fn delete_user(&self, user_id: UserId) -> AppResult<bool>;
}

/// Repository port for store persistence.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Lists every store.
    async fn list_stores(&self) -> AppResult<Vec<Store>>;

    /// Finds a store by identifier.
    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>>;

    /// Finds the store assigned to an owner.
    async fn find_store_by_owner(&self, owner_id: UserId) -> AppResult<Option<Store>>;

    /// Inserts a new store.
    ///
    /// Fails with `Conflict` when another store already uses the email or
    /// the owner.
    async fn create_store(&self, store: Store) -> AppResult<()>;

    /// Replaces the stored store with the same identifier.
    ///
    /// Fails with `NotFound` when the store is gone and with `Conflict` when
    /// another store uses the email or the owner.
    async fn update_store(&self, store: Store) -> AppResult<()>;

    /// Deletes a store. Returns whether a store was removed.
    async fn delete_store(&self, store_id: StoreId) -> AppResult<bool>;
}

/// Repository port for rating persistence.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Lists every rating.
    async fn list_ratings(&self) -> AppResult<Vec<Rating>>;

    /// Lists ratings received by one store.
    async fn list_ratings_for_store(&self, store_id: StoreId) -> AppResult<Vec<Rating>>;

    /// Records `value` as the user's rating of a store, dated `submitted_on`.
    ///
    /// Replaces the existing rating of that pair in place, otherwise inserts
    /// a new one. Lookup and write share one lock, so a pair never ends up
    /// with two ratings.
    async fn upsert_rating(
        &self,
        store_id: StoreId,
        user_id: UserId,
        value: RatingValue,
        submitted_on: NaiveDate,
    ) -> AppResult<Rating>;

    /// Deletes all ratings of a store. Returns the number removed.
    async fn delete_ratings_for_store(&self, store_id: StoreId) -> AppResult<usize>;

    /// Deletes all ratings submitted by a user. Returns the number removed.
    async fn delete_ratings_for_user(&self, user_id: UserId) -> AppResult<usize>;
}

/// Source of the current calendar day.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Clock reading the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
