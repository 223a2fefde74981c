//! Domain entities, table derivation and form validation rules.

#![forbid(unsafe_code)]

mod form;
mod form_rules;
mod rating;
mod record;
mod store;
mod table_view;
mod user;
mod view;

pub use form::{
    FieldRule, FormRules, FormValues, PatternCheck, RuleCondition, ValidationResult, validate,
};
pub use form_rules::{
    ADDRESS_MAX_LENGTH, FormCatalog, FormType, NAME_MAX_LENGTH, NAME_MIN_LENGTH,
    PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, STORE_NAME_MAX_LENGTH,
};
pub use rating::{Rating, RatingId, RatingSummary, RatingValue, StarShare};
pub use record::{FieldValue, Record, ToRecord};
pub use store::{Store, StoreId};
pub use table_view::{display_order, locale_compare, render_rows, render_table};
pub use user::{EmailAddress, Role, User, UserId};
pub use view::{SearchQuery, SortDirection, SortSpec};
