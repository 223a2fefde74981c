use std::env;
use std::str::FromStr;

use storerate_core::AppError;
use storerate_domain::{Role, SortDirection};
use tracing_subscriber::EnvFilter;

/// Screen rendered by one console run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleView {
    Stores,
    AdminUsers,
    AdminStores,
    AdminStats,
    Owner,
    ValidateSignup,
}

impl FromStr for ConsoleView {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "stores" => Ok(Self::Stores),
            "admin-users" => Ok(Self::AdminUsers),
            "admin-stores" => Ok(Self::AdminStores),
            "admin-stats" => Ok(Self::AdminStats),
            "owner" => Ok(Self::Owner),
            "validate-signup" => Ok(Self::ValidateSignup),
            other => Err(AppError::Validation(format!(
                "unknown view '{other}', expected one of stores, admin-users, admin-stores, \
                 admin-stats, owner, validate-signup"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub view: ConsoleView,
    pub role: Role,
    pub user_email: Option<String>,
    pub search: String,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub seed: bool,
}

impl ConsoleConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_sources(env::args().nth(1), |name| env::var(name).ok())
    }

    /// Builds the config from the view argument and a variable lookup.
    pub fn from_sources(
        view_arg: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let view = view_arg
            .map(|value| value.parse::<ConsoleView>())
            .transpose()?
            .unwrap_or(ConsoleView::Stores);

        let role = parse_env(&lookup, "STORERATE_ROLE", Role::User)?;
        let sort_direction = parse_env(&lookup, "STORERATE_SORT_DIRECTION", SortDirection::Asc)?;
        let seed = match optional_env(&lookup, "STORERATE_SEED").as_deref() {
            None => true,
            Some(value) if value.eq_ignore_ascii_case("true") => true,
            Some(value) if value.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "STORERATE_SEED must be either 'true' or 'false', got '{other}'"
                )));
            }
        };

        Ok(Self {
            view,
            role,
            user_email: optional_env(&lookup, "STORERATE_USER_EMAIL"),
            search: lookup("STORERATE_SEARCH").unwrap_or_default(),
            sort_field: optional_env(&lookup, "STORERATE_SORT_FIELD"),
            sort_direction,
            seed,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Reads a form field from `STORERATE_FORM_<FIELD>`.
pub fn form_env(field: &str) -> Option<String> {
    env::var(format!("STORERATE_FORM_{}", field.to_ascii_uppercase())).ok()
}

fn optional_env(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn parse_env<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr<Err = AppError>,
{
    match optional_env(lookup, name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
    }
}
