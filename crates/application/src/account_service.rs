//! Account registration and session lookup.

use std::sync::Arc;

use tracing::info;

use storerate_core::{AppError, AppResult};
use storerate_domain::{EmailAddress, FormCatalog, FormType, FormValues, Role, User, UserId};

use crate::{SessionContext, UserRepository};

/// Application service for self-service accounts.
#[derive(Clone)]
pub struct AccountService {
    user_repository: Arc<dyn UserRepository>,
    forms: Arc<FormCatalog>,
}

impl AccountService {
    /// Creates a new account service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, forms: Arc<FormCatalog>) -> Self {
        Self {
            user_repository,
            forms,
        }
    }

    /// Registers a regular user from the signup form.
    ///
    /// Field failures come back as [`AppError::InvalidForm`]; an email that
    /// is already registered is a [`AppError::Conflict`].
    pub async fn signup(&self, values: &FormValues) -> AppResult<User> {
        self.forms
            .rules(FormType::Signup)
            .validate(values)
            .into_result()?;

        let email = EmailAddress::new(form_value(values, "email"))?;
        let user = User::new(
            UserId::new(),
            form_value(values, "name"),
            email,
            form_value(values, "address"),
            Role::User,
        )?;
        self.user_repository.create_user(user.clone()).await?;

        info!(user_id = %user.id(), "registered user account");
        Ok(user)
    }

    /// Resolves the session of the account registered under `email`.
    pub async fn session_for_email(&self, email: &str) -> AppResult<SessionContext> {
        let email = EmailAddress::new(email)?;
        let user = self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no account registered for '{}'", email.as_str()))
            })?;

        Ok(SessionContext::new(user.id(), user.role()))
    }
}

pub(crate) fn form_value<'a>(values: &'a FormValues, field: &str) -> &'a str {
    values.get(field).map(String::as_str).unwrap_or_default()
}
