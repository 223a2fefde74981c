use async_trait::async_trait;
use storerate_application::UserRepository;
use storerate_core::{AppError, AppResult};
use storerate_domain::{EmailAddress, User, UserId};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory user repository keeping insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `users`.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id() == user_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn create_user(&self, user: User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Err(email_conflict(user.email()));
        }

        users.push(user);
        Ok(())
    }

    async fn update_user(&self, user: User) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|existing| existing.email() == user.email() && existing.id() != user.id())
        {
            return Err(email_conflict(user.email()));
        }

        let existing = users
            .iter_mut()
            .find(|existing| existing.id() == user.id())
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", user.id())))?;
        debug!(user_id = %user.id(), "replacing stored user");
        *existing = user;
        Ok(())
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| user.id() != user_id);
        Ok(users.len() < before)
    }
}

fn email_conflict(email: &EmailAddress) -> AppError {
    AppError::Conflict(format!(
        "email '{}' is already used by another account",
        email.as_str()
    ))
}
