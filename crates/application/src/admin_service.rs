//! Admin dashboard: totals, user and store tables, create/edit/delete.

use std::sync::Arc;

use serde::Serialize;

use storerate_core::AppResult;
use storerate_domain::{FormCatalog, Role};

use crate::{RatingRepository, SessionContext, StoreRepository, UserRepository};

mod stores;
mod users;

pub use stores::store_form_values;
pub use users::user_form_values;

/// Live totals shown at the top of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Registered users of every role.
    pub total_users: usize,
    /// Listed stores.
    pub total_stores: usize,
    /// Submitted ratings.
    pub total_ratings: usize,
}

/// Application service for the admin dashboard. Every operation requires
/// an admin session.
#[derive(Clone)]
pub struct AdminService {
    user_repository: Arc<dyn UserRepository>,
    store_repository: Arc<dyn StoreRepository>,
    rating_repository: Arc<dyn RatingRepository>,
    forms: Arc<FormCatalog>,
}

impl AdminService {
    /// Creates a new admin service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        store_repository: Arc<dyn StoreRepository>,
        rating_repository: Arc<dyn RatingRepository>,
        forms: Arc<FormCatalog>,
    ) -> Self {
        Self {
            user_repository,
            store_repository,
            rating_repository,
            forms,
        }
    }

    /// Counts users, stores and ratings as currently stored.
    pub async fn stats(&self, session: &SessionContext) -> AppResult<AdminStats> {
        session.require_role(Role::Admin)?;

        Ok(AdminStats {
            total_users: self.user_repository.list_users().await?.len(),
            total_stores: self.store_repository.list_stores().await?.len(),
            total_ratings: self.rating_repository.list_ratings().await?.len(),
        })
    }
}

#[cfg(test)]
mod tests;
