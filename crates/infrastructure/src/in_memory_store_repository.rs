use async_trait::async_trait;
use storerate_application::StoreRepository;
use storerate_core::{AppError, AppResult};
use storerate_domain::{Store, StoreId, UserId};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory store repository keeping insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStoreRepository {
    stores: RwLock<Vec<Store>>,
}

impl InMemoryStoreRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `stores`.
    #[must_use]
    pub fn with_stores(stores: Vec<Store>) -> Self {
        Self {
            stores: RwLock::new(stores),
        }
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn list_stores(&self) -> AppResult<Vec<Store>> {
        Ok(self.stores.read().await.clone())
    }

    async fn find_store(&self, store_id: StoreId) -> AppResult<Option<Store>> {
        Ok(self
            .stores
            .read()
            .await
            .iter()
            .find(|store| store.id() == store_id)
            .cloned())
    }

    async fn find_store_by_owner(&self, owner_id: UserId) -> AppResult<Option<Store>> {
        Ok(self
            .stores
            .read()
            .await
            .iter()
            .find(|store| store.owner_id() == Some(owner_id))
            .cloned())
    }

    async fn create_store(&self, store: Store) -> AppResult<()> {
        let mut stores = self.stores.write().await;
        ensure_unique(&stores, &store)?;

        stores.push(store);
        Ok(())
    }

    async fn update_store(&self, store: Store) -> AppResult<()> {
        let mut stores = self.stores.write().await;
        ensure_unique(&stores, &store)?;

        let existing = stores
            .iter_mut()
            .find(|existing| existing.id() == store.id())
            .ok_or_else(|| AppError::NotFound(format!("store '{}' not found", store.id())))?;
        debug!(store_id = %store.id(), "replacing stored store");
        *existing = store;
        Ok(())
    }

    async fn delete_store(&self, store_id: StoreId) -> AppResult<bool> {
        let mut stores = self.stores.write().await;
        let before = stores.len();
        stores.retain(|store| store.id() != store_id);
        Ok(stores.len() < before)
    }
}

/// Rejects `store` when another stored store has its email or its owner.
fn ensure_unique(stores: &[Store], store: &Store) -> AppResult<()> {
    let others = || stores.iter().filter(|existing| existing.id() != store.id());

    if others().any(|existing| existing.email() == store.email()) {
        return Err(AppError::Conflict(format!(
            "email '{}' is already used by another store",
            store.email().as_str()
        )));
    }

    if let Some(owner_id) = store.owner_id()
        && others().any(|existing| existing.owner_id() == Some(owner_id))
    {
        return Err(AppError::Conflict(format!(
            "owner '{owner_id}' already manages another store"
        )));
    }

    Ok(())
}
