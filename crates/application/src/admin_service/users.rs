use tracing::info;

use storerate_core::{AppError, AppResult};
use storerate_domain::{EmailAddress, FormValues, Role, User, UserId};

use crate::account_service::form_value;
use crate::{EditorState, EntityDialog, SessionContext, TableState};

use super::AdminService;

impl AdminService {
    /// Lists users filtered and sorted by `table`.
    pub async fn list_users(
        &self,
        session: &SessionContext,
        table: &TableState,
    ) -> AppResult<Vec<User>> {
        session.require_role(Role::Admin)?;
        let users = self.user_repository.list_users().await?;
        Ok(table.render(&users))
    }

    /// Saves the user dialog's draft.
    ///
    /// The dialog state decides between creating a user and updating the
    /// edited one. On success the dialog closes; on a form failure the
    /// field errors stay on the draft.
    pub async fn save_user(
        &self,
        session: &SessionContext,
        dialog: &mut EntityDialog<UserId>,
    ) -> AppResult<User> {
        session.require_role(Role::Admin)?;
        let editing = match dialog.state() {
            EditorState::Closed => {
                return Err(AppError::Validation("user dialog is not open".to_owned()));
            }
            EditorState::Creating => None,
            EditorState::Editing(user_id) => Some(user_id),
        };

        if !dialog.draft_mut().validate(&self.forms) {
            dialog.draft().errors().clone().into_result()?;
        }

        let values = dialog.draft().values();
        let email = EmailAddress::new(form_value(values, "email"))?;
        let role: Role = form_value(values, "role").parse()?;

        let user = User::new(
            editing.unwrap_or_else(UserId::new),
            form_value(values, "name"),
            email,
            form_value(values, "address"),
            role,
        )?;
        let user_id = user.id();
        match editing {
            Some(_) => self.user_repository.update_user(user.clone()).await?,
            None => self.user_repository.create_user(user.clone()).await?,
        }
        if role != Role::Owner {
            self.release_owned_store(user_id).await?;
        }

        dialog.close();
        info!(
            user_id = %user_id,
            created = editing.is_none(),
            role = role.as_str(),
            "saved user"
        );
        Ok(user)
    }

    /// Deletes a user with their ratings and releases any store they own.
    pub async fn delete_user(&self, session: &SessionContext, user_id: UserId) -> AppResult<()> {
        session.require_role(Role::Admin)?;
        if self.user_repository.find_user(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("user '{user_id}' not found")));
        }

        let removed_ratings = self.rating_repository.delete_ratings_for_user(user_id).await?;
        self.release_owned_store(user_id).await?;
        self.user_repository.delete_user(user_id).await?;

        info!(user_id = %user_id, removed_ratings, "deleted user");
        Ok(())
    }

    async fn release_owned_store(&self, user_id: UserId) -> AppResult<()> {
        if let Some(store) = self.store_repository.find_store_by_owner(user_id).await? {
            let store_id = store.id();
            self.store_repository
                .update_store(store.with_owner(None))
                .await?;
            info!(store_id = %store_id, user_id = %user_id, "released store ownership");
        }
        Ok(())
    }
}

/// Returns the edit-form values of an existing user. The password is left
/// blank so saving keeps it unchanged.
#[must_use]
pub fn user_form_values(user: &User) -> FormValues {
    FormValues::from([
        ("name".to_owned(), user.name().to_owned()),
        ("email".to_owned(), user.email().as_str().to_owned()),
        ("address".to_owned(), user.address().to_owned()),
        ("password".to_owned(), String::new()),
        ("role".to_owned(), user.role().as_str().to_owned()),
    ])
}
