use serde::Serialize;
use storerate_core::{AppError, AppResult};
use storerate_domain::{Role, UserId};

/// Top-level screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    /// Sign-in form.
    Login,
    /// Account registration form.
    Signup,
    /// Store listing with rating input.
    Stores,
    /// Admin dashboard for users and stores.
    Admin,
    /// Owner dashboard for one store's ratings.
    Owner,
}

impl AppView {
    /// Returns the route path segment of the view.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Stores => "stores",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

/// Signed-in user and role, passed explicitly to services that need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    user_id: UserId,
    role: Role,
}

impl SessionContext {
    /// Creates a session context.
    #[must_use]
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the signed-in role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the views this session may open.
    #[must_use]
    pub fn available_views(&self) -> Vec<AppView> {
        navigation(Some(self))
    }

    /// Fails with [`AppError::Forbidden`] unless the session has `role`.
    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.role != role {
            return Err(AppError::Forbidden(format!(
                "{} role required, session has {}",
                role.as_str(),
                self.role.as_str()
            )));
        }

        Ok(())
    }
}

/// Returns the views reachable from the navigation bar.
#[must_use]
pub fn navigation(session: Option<&SessionContext>) -> Vec<AppView> {
    let Some(session) = session else {
        return vec![AppView::Login, AppView::Signup];
    };

    let mut views = vec![AppView::Stores];
    match session.role() {
        Role::Admin => views.push(AppView::Admin),
        Role::Owner => views.push(AppView::Owner),
        Role::User => {}
    }
    views
}
