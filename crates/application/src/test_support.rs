use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use storerate_core::{AppError, AppResult};
use storerate_domain::{
    EmailAddress, FormCatalog, FormValues, Rating, RatingId, RatingValue, Role, Store, StoreId,
    User, UserId,
};

use crate::{Clock, RatingRepository, StoreRepository, UserRepository};

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub(crate) users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().await.clone())
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.id() == user_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn create_user(&self, user: User) -> AppResult<()> {
        tokio::task::yield_now().await;
        let mut users = self.users.lock().await;
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Err(AppError::Conflict(format!(
                "email '{}' is already used by another account",
                user.email().as_str()
            )));
        }
        users.push(user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> AppResult<()> {
        tokio::task::yield_now().await;
        let mut users = self.users.lock().await;
        if users
            .iter()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id())
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already used by another account",
                user.email().as_str()
            )));
        }
        let existing = users
            .iter_mut()
            .find(|existing| existing.id() == user.id())
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", user.id())))?;
        *existing = user;
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<bool> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|user| user.id() != user_id);
        Ok(users.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeStoreRepository {
    pub(crate) stores: Mutex<Vec<Store>>,
}

#[async_trait]
impl StoreRepository for FakeStoreRepository {
    async fn list_stores(&self) -> AppResult<Vec<Store>> {
        Ok(self.stores.lock().await.clone())
    }

    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>> {
        Ok(self
            .stores
            .lock()
            .await
            .iter()
            .find(|store| store.id() == store_id)
            .cloned())
    }

    async fn find_store_by_owner(&self, owner_id: UserId) -> AppResult<Option<Store>> {
        Ok(self
            .stores
            .lock()
            .await
            .iter()
            .find(|store| store.owner_id() == Some(owner_id))
            .cloned())
    }

    async fn create_store(&self, store: Store) -> AppResult<()> {
        tokio::task::yield_now().await;
        let mut stores = self.stores.lock().await;
        ensure_unique_store(&stores, &store)?;
        stores.push(store);
        Ok(())
    }

    async fn update_store(&self, store: Store) -> AppResult<()> {
        tokio::task::yield_now().await;
        let mut stores = self.stores.lock().await;
        ensure_unique_store(&stores, &store)?;
        let existing = stores
            .iter_mut()
            .find(|existing| existing.id() == store.id())
            .ok_or_else(|| AppError::NotFound(format!("store '{}' not found", store.id())))?;
        *existing = store;
        Ok(())
    }

    async fn delete_store(&self, store_id: StoreId) -> AppResult<bool> {
        let mut stores = self.stores.lock().await;
        let before = stores.len();
        stores.retain(|store| store.id() != store_id);
        Ok(stores.len() != before)
    }
}

fn ensure_unique_store(stores: &[Store], store: &Store) -> AppResult<()> {
    let others = || stores.iter().filter(|existing| existing.id() != store.id());
    if others().any(|existing| existing.email() == store.email()) {
        return Err(AppError::Conflict(format!(
            "email '{}' is already used by another store",
            store.email().as_str()
        )));
    }
    if store.owner_id().is_some()
        && others().any(|existing| existing.owner_id() == store.owner_id())
    {
        return Err(AppError::Conflict("owner already manages another store".to_owned()));
    }
    Ok(())
}

#[derive(Default)]
pub(crate) struct FakeRatingRepository {
    pub(crate) ratings: Mutex<Vec<Rating>>,
}

#[async_trait]
impl RatingRepository for FakeRatingRepository {
    async fn list_ratings(&self) -> AppResult<Vec<Rating>> {
        Ok(self.ratings.lock().await.clone())
    }

    async fn list_ratings_for_store(&self, store_id: StoreId) -> AppResult<Vec<Rating>> {
        Ok(self
            .ratings
            .lock()
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
        tokio::task::yield_now().await;
        let mut ratings = self.ratings.lock().await;
        if let Some(existing) = ratings
            .iter_mut()
            .find(|rating| rating.store_id() == store_id && rating.user_id() == user_id)
        {
            *existing = existing.clone().resubmitted(value, submitted_on);
            return Ok(existing.clone());
        }
        let rating = Rating::new(RatingId::new(), store_id, user_id, value, submitted_on);
        ratings.push(rating.clone());
        Ok(rating)
    }

    async fn delete_ratings_for_store(&self, store_id: StoreId) -> AppResult<usize> {
        let mut ratings = self.ratings.lock().await;
        let before = ratings.len();
        ratings.retain(|rating| rating.store_id() != store_id);
        Ok(before - ratings.len())
    }

    async fn delete_ratings_for_user(&self, user_id: UserId) -> AppResult<usize> {
        let mut ratings = self.ratings.lock().await;
        let before = ratings.len();
        ratings.retain(|rating| rating.user_id() != user_id);
        Ok(before - ratings.len())
    }
}

pub(crate) struct FixedClock(pub(crate) NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Shared repositories for one test.
#[derive(Default, Clone)]
pub(crate) struct Fixture {
    pub(crate) users: Arc<FakeUserRepository>,
    pub(crate) stores: Arc<FakeStoreRepository>,
    pub(crate) ratings: Arc<FakeRatingRepository>,
}

impl Fixture {
    pub(crate) async fn add_user(&self, name: &str, email: &str, role: Role) -> User {
        let user = User::new(UserId::new(), name, email, "1 Test Street, Testville", role)
            .unwrap_or_else(|error| panic!("{error}"));
        self.users.users.lock().await.push(user.clone());
        user
    }

    pub(crate) async fn add_store(&self, name: &str, email: &str, owner: Option<&User>) -> Store {
        let store = Store::new(
            StoreId::new(),
            name,
            email,
            "2 Market Road, Shoptown",
            owner.map(User::id),
        )
        .unwrap_or_else(|error| panic!("{error}"));
        self.stores.stores.lock().await.push(store.clone());
        store
    }

    pub(crate) async fn add_rating(&self, store: &Store, user: &User, value: u8, day: u32) {
        let rating = Rating::new(
            RatingId::new(),
            store.id(),
            user.id(),
            RatingValue::new(value).unwrap_or_else(|error| panic!("{error}")),
            date(2024, 1, day),
        );
        self.ratings.ratings.lock().await.push(rating);
    }
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| panic!("invalid date"))
}

pub(crate) fn forms() -> Arc<FormCatalog> {
    Arc::new(FormCatalog::standard().unwrap_or_else(|error| panic!("{error}")))
}

pub(crate) fn form_values(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(field, value)| ((*field).to_owned(), (*value).to_owned()))
        .collect()
}
