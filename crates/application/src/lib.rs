//! Application services and ports.

#![forbid(unsafe_code)]

mod account_service;
mod admin_service;
mod editor;
mod owner_dashboard_service;
mod ports;
mod session;
mod store_catalog_service;
mod store_listing;
mod table_state;

#[cfg(test)]
mod test_support;

pub use account_service::AccountService;
pub use admin_service::{AdminService, AdminStats, store_form_values, user_form_values};
pub use editor::{EditorState, EntityDialog, FormDraft};
pub use owner_dashboard_service::{OwnerDashboard, OwnerDashboardService, OwnerRatingRow};
pub use ports::{Clock, RatingRepository, StoreRepository, SystemClock, UserRepository};
pub use session::{AppView, SessionContext, navigation};
pub use store_catalog_service::StoreCatalogService;
pub use store_listing::StoreListing;
pub use table_state::{TablePreset, TableState};
