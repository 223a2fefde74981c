//! Fixed field-rule tables for every form in the client.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storerate_core::{AppError, AppResult};

use crate::form::{FieldRule, FormRules, PatternCheck, RuleCondition};

/// Minimum length of a person's full name.
pub const NAME_MIN_LENGTH: usize = 20;
/// Maximum length of a person's full name.
pub const NAME_MAX_LENGTH: usize = 60;
/// Maximum length of a postal address.
pub const ADDRESS_MAX_LENGTH: usize = 400;
/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Maximum password length.
pub const PASSWORD_MAX_LENGTH: usize = 16;
/// Maximum length of a store name.
pub const STORE_NAME_MAX_LENGTH: usize = 60;

const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";
const UPPERCASE_PATTERN: &str = "[A-Z]";
const SPECIAL_CHARACTER_PATTERN: &str = r#"[!@#$%^&*(),.?":{}|<>]"#;
const ROLE_PATTERN: &str = "^(admin|user|owner)$";

/// Forms that carry a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    /// Self-service account registration.
    Signup,
    /// Email and password sign-in.
    Login,
    /// Admin dialog creating a user.
    AdminUserCreate,
    /// Admin dialog editing an existing user.
    AdminUserEdit,
    /// Admin dialog creating or editing a store.
    AdminStore,
}

impl FormType {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::AdminUserCreate => "admin_user_create",
            Self::AdminUserEdit => "admin_user_edit",
            Self::AdminStore => "admin_store",
        }
    }
}

impl FromStr for FormType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "signup" => Ok(Self::Signup),
            "login" => Ok(Self::Login),
            "admin_user_create" => Ok(Self::AdminUserCreate),
            "admin_user_edit" => Ok(Self::AdminUserEdit),
            "admin_store" => Ok(Self::AdminStore),
            _ => Err(AppError::Validation(format!("unknown form type '{value}'"))),
        }
    }
}

/// Compiled rule tables for all forms, built once per session.
#[derive(Debug, Clone)]
pub struct FormCatalog {
    signup: FormRules,
    login: FormRules,
    admin_user_create: FormRules,
    admin_user_edit: FormRules,
    admin_store: FormRules,
}

impl FormCatalog {
    /// Builds the standard rule tables.
    pub fn standard() -> AppResult<Self> {
        let signup = FormRules::new()
            .field("name", person_name_rule())
            .field("email", email_rule("Email")?)
            .field("address", address_rule())
            .field("password", password_rule()?.required());

        let login = FormRules::new()
            .field("email", email_rule("Email")?)
            .field("password", FieldRule::new("Password").required());

        let role_rule = FieldRule::new("Role").required().pattern(PatternCheck::new(
            ROLE_PATTERN,
            "Role must be admin, user, or owner",
        )?);

        let admin_user_create = signup.clone().field("role", role_rule.clone());

        // Editing keeps the stored password unless a new one is entered.
        let admin_user_edit = FormRules::new()
            .field("name", person_name_rule())
            .field("email", email_rule("Email")?)
            .field("address", address_rule())
            .field("password", password_rule()?)
            .field("role", role_rule);

        let admin_store = FormRules::new()
            .field(
                "name",
                FieldRule::new("Store name")
                    .required()
                    .non_blank()
                    .max_length(STORE_NAME_MAX_LENGTH),
            )
            .field("email", email_rule("Store email")?)
            .field("address", address_rule());

        Ok(Self {
            signup,
            login,
            admin_user_create,
            admin_user_edit,
            admin_store,
        })
    }

    /// Returns the rule table for a form.
    #[must_use]
    pub fn rules(&self, form_type: FormType) -> &FormRules {
        match form_type {
            FormType::Signup => &self.signup,
            FormType::Login => &self.login,
            FormType::AdminUserCreate => &self.admin_user_create,
            FormType::AdminUserEdit => &self.admin_user_edit,
            FormType::AdminStore => &self.admin_store,
        }
    }
}

fn person_name_rule() -> FieldRule {
    FieldRule::new("Name")
        .required()
        .non_blank()
        .length(NAME_MIN_LENGTH, NAME_MAX_LENGTH)
}

fn email_rule(label: &str) -> AppResult<FieldRule> {
    Ok(FieldRule::new(label)
        .required()
        .pattern(PatternCheck::new(EMAIL_PATTERN, format!("{label} is invalid"))?))
}

fn address_rule() -> FieldRule {
    FieldRule::new("Address")
        .required()
        .non_blank()
        .max_length(ADDRESS_MAX_LENGTH)
        .message(
            RuleCondition::Length,
            format!("Address must be less than {ADDRESS_MAX_LENGTH} characters"),
        )
}

fn password_rule() -> AppResult<FieldRule> {
    Ok(FieldRule::new("Password")
        .length(PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH)
        .pattern(PatternCheck::new(
            UPPERCASE_PATTERN,
            "Password must include at least one uppercase letter",
        )?)
        .pattern(PatternCheck::new(
            SPECIAL_CHARACTER_PATTERN,
            "Password must include at least one special character",
        )?))
}
