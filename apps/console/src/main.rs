//! Storerate console composition root.

#![forbid(unsafe_code)]

mod console_config;
mod dev_seed;

use std::sync::Arc;

use serde::Serialize;
use storerate_application::{
    AccountService, AdminService, OwnerDashboardService, SessionContext, StoreCatalogService,
    SystemClock, TablePreset, TableState,
};
use storerate_core::{AppError, AppResult, FieldErrors};
use storerate_domain::{FormCatalog, FormType, FormValues, SortSpec, User};
use tracing::info;

use crate::console_config::{ConsoleConfig, ConsoleView, form_env, init_tracing};

#[derive(Serialize)]
struct SignupReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    let repositories = if config.seed {
        dev_seed::run()?
    } else {
        dev_seed::empty()
    };
    let users = Arc::new(repositories.users);
    let stores = Arc::new(repositories.stores);
    let ratings = Arc::new(repositories.ratings);
    let forms = Arc::new(FormCatalog::standard()?);

    let account_service = AccountService::new(users.clone(), forms.clone());

    let output = match config.view {
        ConsoleView::ValidateSignup => validate_signup(&account_service, &forms).await?,
        view => {
            let session = resolve_session(&account_service, &config).await?;
            info!(
                user_id = %session.user_id(),
                role = session.role().as_str(),
                views = ?session.available_views(),
                "resolved console session"
            );

            match view {
                ConsoleView::Stores => {
                    let catalog = StoreCatalogService::new(
                        stores.clone(),
                        ratings.clone(),
                        Arc::new(SystemClock),
                    );
                    let table = table_for(TablePreset::StoreList, &config)?;
                    to_json(&catalog.list_stores(&session, &table).await?)?
                }
                ConsoleView::Owner => {
                    let dashboard =
                        OwnerDashboardService::new(users.clone(), stores.clone(), ratings.clone());
                    let table = table_for(TablePreset::OwnerRatings, &config)?;
                    to_json(&dashboard.summary(&session, &table).await?)?
                }
                _ => {
                    let admin = AdminService::new(
                        users.clone(),
                        stores.clone(),
                        ratings.clone(),
                        forms.clone(),
                    );
                    render_admin(&admin, &session, view, &config).await?
                }
            }
        }
    };

    println!("{output}");
    Ok(())
}

async fn render_admin(
    admin: &AdminService,
    session: &SessionContext,
    view: ConsoleView,
    config: &ConsoleConfig,
) -> AppResult<String> {
    match view {
        ConsoleView::AdminUsers => {
            let table = table_for(TablePreset::AdminUsers, config)?;
            to_json(&admin.list_users(session, &table).await?)
        }
        ConsoleView::AdminStores => {
            let table = table_for(TablePreset::AdminStores, config)?;
            to_json(&admin.list_stores(session, &table).await?)
        }
        _ => to_json(&admin.stats(session).await?),
    }
}

async fn resolve_session(
    account_service: &AccountService,
    config: &ConsoleConfig,
) -> AppResult<SessionContext> {
    let email = config
        .user_email
        .as_deref()
        .unwrap_or_else(|| dev_seed::default_email_for(config.role));
    let session = account_service.session_for_email(email).await?;

    if config.user_email.is_none() && session.role() != config.role {
        return Err(AppError::Validation(format!(
            "seeded account '{email}' does not have role '{}'",
            config.role.as_str()
        )));
    }

    Ok(session)
}

async fn validate_signup(
    account_service: &AccountService,
    forms: &FormCatalog,
) -> AppResult<String> {
    let values: FormValues = forms
        .rules(FormType::Signup)
        .field_names()
        .filter_map(|field| form_env(field).map(|value| (field.to_owned(), value)))
        .collect();

    let report = match account_service.signup(&values).await {
        Ok(user) => SignupReport {
            valid: true,
            errors: None,
            user: Some(user),
        },
        Err(AppError::InvalidForm(errors)) => SignupReport {
            valid: false,
            errors: Some(errors),
            user: None,
        },
        Err(error) => return Err(error),
    };

    to_json(&report)
}

fn table_for(preset: TablePreset, config: &ConsoleConfig) -> AppResult<TableState> {
    let mut table = TableState::for_preset(preset)?;
    table.set_query(config.search.as_str());
    if let Some(field) = &config.sort_field {
        table.set_sort(SortSpec::new(field.as_str(), config.sort_direction)?);
    }

    Ok(table)
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to render output: {error}")))
}
