use tracing::info;

use storerate_core::{AppError, AppResult, FieldErrors};
use storerate_domain::{EmailAddress, FormValues, Role, Store, StoreId, UserId};

use crate::account_service::form_value;
use crate::store_listing::build_listings;
use crate::{EditorState, EntityDialog, SessionContext, StoreListing, TableState};

use super::AdminService;

/// Optional store form field naming the owning account by email.
pub(crate) const OWNER_EMAIL_FIELD: &str = "owner_email";

impl AdminService {
    /// Lists stores with their average rating, filtered and sorted by
    /// `table`.
    pub async fn list_stores(
        &self,
        session: &SessionContext,
        table: &TableState,
    ) -> AppResult<Vec<StoreListing>> {
        session.require_role(Role::Admin)?;
        let stores = self.store_repository.list_stores().await?;
        let ratings = self.rating_repository.list_ratings().await?;
        Ok(table.render(&build_listings(stores, &ratings, None)))
    }

    /// Saves the store dialog's draft.
    ///
    /// Store emails are unique. A non-blank `owner_email` assigns the store
    /// to that owner account; a blank one leaves the store unowned.
    pub async fn save_store(
        &self,
        session: &SessionContext,
        dialog: &mut EntityDialog<StoreId>,
    ) -> AppResult<Store> {
        session.require_role(Role::Admin)?;
        let editing = match dialog.state() {
            EditorState::Closed => {
                return Err(AppError::Validation("store dialog is not open".to_owned()));
            }
            EditorState::Creating => None,
            EditorState::Editing(store_id) => Some(store_id),
        };

        if !dialog.draft_mut().validate(&self.forms) {
            dialog.draft().errors().clone().into_result()?;
        }

        let values = dialog.draft().values();
        let email = EmailAddress::new(form_value(values, "email"))?;
        let store_id = editing.unwrap_or_else(StoreId::new);
        let owner_id = self
            .resolve_owner(form_value(values, OWNER_EMAIL_FIELD), store_id)
            .await?;

        let store = Store::new(
            store_id,
            form_value(values, "name"),
            email,
            form_value(values, "address"),
            owner_id,
        )?;
        match editing {
            Some(_) => self.store_repository.update_store(store.clone()).await?,
            None => self.store_repository.create_store(store.clone()).await?,
        }

        dialog.close();
        info!(
            store_id = %store_id,
            created = editing.is_none(),
            owned = owner_id.is_some(),
            "saved store"
        );
        Ok(store)
    }

    /// Deletes a store and every rating it received.
    pub async fn delete_store(&self, session: &SessionContext, store_id: StoreId) -> AppResult<()> {
        session.require_role(Role::Admin)?;
        if !self.store_repository.delete_store(store_id).await? {
            return Err(AppError::NotFound(format!("store '{store_id}' not found")));
        }

        let removed_ratings = self
            .rating_repository
            .delete_ratings_for_store(store_id)
            .await?;
        info!(store_id = %store_id, removed_ratings, "deleted store");
        Ok(())
    }

    async fn resolve_owner(
        &self,
        owner_email: &str,
        store_id: StoreId,
    ) -> AppResult<Option<UserId>> {
        if owner_email.trim().is_empty() {
            return Ok(None);
        }

        let email = EmailAddress::new(owner_email)?;
        let owner = self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .filter(|user| user.role() == Role::Owner)
            .ok_or_else(|| owner_field_error("Owner must be a registered store owner"))?;

        if let Some(owned) = self.store_repository.find_store_by_owner(owner.id()).await?
            && owned.id() != store_id
        {
            return Err(owner_field_error("Owner already manages another store"));
        }

        Ok(Some(owner.id()))
    }
}

fn owner_field_error(message: &str) -> AppError {
    AppError::InvalidForm(FieldErrors::from([(
        OWNER_EMAIL_FIELD.to_owned(),
        message.to_owned(),
    )]))
}

/// Returns the edit-form values of an existing store. `owner_email` is the
/// email of the assigned owner, or blank.
#[must_use]
pub fn store_form_values(store: &Store, owner_email: Option<&EmailAddress>) -> FormValues {
    FormValues::from([
        ("name".to_owned(), store.name().to_owned()),
        ("email".to_owned(), store.email().as_str().to_owned()),
        ("address".to_owned(), store.address().to_owned()),
        (
            OWNER_EMAIL_FIELD.to_owned(),
            owner_email.map(EmailAddress::as_str).unwrap_or_default().to_owned(),
        ),
    ])
}
