use storerate_core::AppError;
use storerate_domain::{FormType, FormValues, Role, StoreId, User, UserId};

use super::{AdminService, store_form_values, user_form_values};
use crate::test_support::{Fixture, form_values, forms};
use crate::{EditorState, EntityDialog, SessionContext, TablePreset, TableState};

fn service(fixture: &Fixture) -> AdminService {
    AdminService::new(
        fixture.users.clone(),
        fixture.stores.clone(),
        fixture.ratings.clone(),
        forms(),
    )
}

fn admin_session(admin: &User) -> SessionContext {
    SessionContext::new(admin.id(), admin.role())
}

async fn fixture_with_admin() -> (Fixture, User) {
    let fixture = Fixture::default();
    let admin = fixture
        .add_user("System Administrator Account", "admin@example.com", Role::Admin)
        .await;
    (fixture, admin)
}

fn user_dialog() -> EntityDialog<UserId> {
    EntityDialog::new(FormType::AdminUserCreate, FormType::AdminUserEdit)
}

fn store_dialog() -> EntityDialog<StoreId> {
    EntityDialog::new(FormType::AdminStore, FormType::AdminStore)
}

fn new_user_values(email: &str, role: &str) -> FormValues {
    form_values(&[
        ("name", "Alice Marketplace Customer"),
        ("email", email),
        ("address", "44 Harbor View, Port City"),
        ("password", "Harbor#2024"),
        ("role", role),
    ])
}

fn table(preset: TablePreset) -> TableState {
    TableState::for_preset(preset).unwrap_or_else(|error| panic!("{error}"))
}

#[tokio::test]
async fn stats_count_live_records() {
    let (fixture, admin) = fixture_with_admin().await;
    let user = fixture
        .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
        .await;
    let store = fixture.add_store("Book Haven", "books@example.com", None).await;
    fixture.add_rating(&store, &user, 5, 3).await;

    let stats = service(&fixture)
        .stats(&admin_session(&admin))
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_stores, 1);
    assert_eq!(stats.total_ratings, 1);
}

#[tokio::test]
async fn non_admin_sessions_are_forbidden() {
    let fixture = Fixture::default();
    let user = fixture
        .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
        .await;
    let session = SessionContext::new(user.id(), user.role());
    let admin = service(&fixture);

    assert!(matches!(admin.stats(&session).await, Err(AppError::Forbidden(_))));
    assert!(matches!(
        admin.delete_user(&session, user.id()).await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn user_table_searches_role_column() {
    let (fixture, admin) = fixture_with_admin().await;
    fixture
        .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
        .await;

    let mut users_table = table(TablePreset::AdminUsers);
    users_table.set_query("owner");
    let rows = service(&fixture)
        .list_users(&admin_session(&admin), &users_table)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email().as_str(), "bob@example.com");
}

#[tokio::test]
async fn creating_user_closes_dialog() {
    let (fixture, admin) = fixture_with_admin().await;
    let mut dialog = user_dialog();
    dialog.open_create(new_user_values("alice@example.com", "owner"));

    let user = service(&fixture)
        .save_user(&admin_session(&admin), &mut dialog)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(user.role(), Role::Owner);
    assert_eq!(dialog.state(), EditorState::Closed);
    assert_eq!(fixture.users.users.lock().await.len(), 2);
}

#[tokio::test]
async fn invalid_user_draft_keeps_errors_and_stays_open() {
    let (fixture, admin) = fixture_with_admin().await;
    let mut dialog = user_dialog();
    let mut values = new_user_values("alice@example.com", "superuser");
    values.insert("password".to_owned(), String::new());
    dialog.open_create(values);

    let result = service(&fixture)
        .save_user(&admin_session(&admin), &mut dialog)
        .await;

    assert!(matches!(result, Err(AppError::InvalidForm(_))));
    assert_eq!(dialog.state(), EditorState::Creating);
    assert_eq!(
        dialog.draft().errors().get("role"),
        Some("Role must be admin, user, or owner")
    );
    assert_eq!(
        dialog.draft().errors().get("password"),
        Some("Password is required")
    );
}

#[tokio::test]
async fn editing_user_allows_blank_password_and_keeps_identity() {
    let (fixture, admin) = fixture_with_admin().await;
    let user = fixture
        .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
        .await;

    let mut dialog = user_dialog();
    let mut values = user_form_values(&user);
    values.insert("address".to_owned(), "99 New Road, Elsewhere".to_owned());
    dialog.open_edit(user.id(), values);

    let saved = service(&fixture)
        .save_user(&admin_session(&admin), &mut dialog)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(saved.id(), user.id());
    assert_eq!(saved.address(), "99 New Road, Elsewhere");
    assert_eq!(fixture.users.users.lock().await.len(), 2);
}

#[tokio::test]
async fn user_email_must_stay_unique() {
    let (fixture, admin) = fixture_with_admin().await;
    let mut dialog = user_dialog();
    dialog.open_create(new_user_values("ADMIN@example.com", "user"));

    let result = service(&fixture)
        .save_user(&admin_session(&admin), &mut dialog)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn concurrent_user_creates_with_one_email_keep_one() {
    let (fixture, admin) = fixture_with_admin().await;
    let session = admin_session(&admin);
    let service = service(&fixture);
    let mut first = user_dialog();
    first.open_create(new_user_values("alice@example.com", "user"));
    let mut second = user_dialog();
    second.open_create(new_user_values("ALICE@example.com", "owner"));

    let (left, right) = tokio::join!(
        service.save_user(&session, &mut first),
        service.save_user(&session, &mut second),
    );

    assert_eq!(usize::from(left.is_ok()) + usize::from(right.is_ok()), 1);
    assert!(
        matches!(left, Err(AppError::Conflict(_))) || matches!(right, Err(AppError::Conflict(_)))
    );
    assert_eq!(fixture.users.users.lock().await.len(), 2);
}

#[tokio::test]
async fn concurrent_store_creates_with_one_email_keep_one() {
    let (fixture, admin) = fixture_with_admin().await;
    let session = admin_session(&admin);
    let service = service(&fixture);
    let store_values = |name: &str| {
        form_values(&[
            ("name", name),
            ("email", "coffee@example.com"),
            ("address", "7 Bean Street, Brewtown"),
        ])
    };
    let mut first = store_dialog();
    first.open_create(store_values("Coffee Corner"));
    let mut second = store_dialog();
    second.open_create(store_values("Coffee Corner Annex"));

    let (left, right) = tokio::join!(
        service.save_store(&session, &mut first),
        service.save_store(&session, &mut second),
    );

    assert_eq!(usize::from(left.is_ok()) + usize::from(right.is_ok()), 1);
    assert_eq!(fixture.stores.stores.lock().await.len(), 1);
}

#[tokio::test]
async fn whitespace_store_name_stays_on_the_draft() {
    let (fixture, admin) = fixture_with_admin().await;
    let mut dialog = store_dialog();
    dialog.open_create(form_values(&[
        ("name", "     "),
        ("email", "coffee@example.com"),
        ("address", "7 Bean Street, Brewtown"),
    ]));

    let result = service(&fixture)
        .save_store(&admin_session(&admin), &mut dialog)
        .await;

    assert!(matches!(result, Err(AppError::InvalidForm(_))));
    assert_eq!(dialog.draft().errors().get("name"), Some("Store name is required"));
    assert!(fixture.stores.stores.lock().await.is_empty());
}

#[tokio::test]
async fn saving_with_closed_dialog_is_rejected() {
    let (fixture, admin) = fixture_with_admin().await;
    let mut dialog = user_dialog();

    let result = service(&fixture)
        .save_user(&admin_session(&admin), &mut dialog)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn deleting_user_removes_ratings_and_releases_store() {
    let (fixture, admin) = fixture_with_admin().await;
    let owner = fixture
        .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
        .await;
    let store = fixture
        .add_store("Electronics Store", "electronics@example.com", Some(&owner))
        .await;
    fixture.add_rating(&store, &owner, 3, 1).await;

    service(&fixture)
        .delete_user(&admin_session(&admin), owner.id())
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert!(fixture.ratings.ratings.lock().await.is_empty());
    let stores = fixture.stores.stores.lock().await;
    assert_eq!(stores[0].owner_id(), None);

    let missing = service(&fixture)
        .delete_user(&admin_session(&admin), owner.id())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn creating_store_assigns_owner_by_email() {
    let (fixture, admin) = fixture_with_admin().await;
    let owner = fixture
        .add_user("Bob Store Owner Brown", "bob@example.com", Role::Owner)
        .await;

    let mut dialog = store_dialog();
    dialog.open_create(form_values(&[
        ("name", "Coffee Corner"),
        ("email", "coffee@example.com"),
        ("address", "7 Bean Street, Brewtown"),
        ("owner_email", "Bob@Example.com"),
    ]));

    let store = service(&fixture)
        .save_store(&admin_session(&admin), &mut dialog)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(store.owner_id(), Some(owner.id()));
    assert!(!dialog.state().is_open());
}

#[tokio::test]
async fn store_owner_must_have_owner_role() {
    let (fixture, admin) = fixture_with_admin().await;
    let mut dialog = store_dialog();
    dialog.open_create(form_values(&[
        ("name", "Coffee Corner"),
        ("email", "coffee@example.com"),
        ("address", "7 Bean Street, Brewtown"),
        ("owner_email", "admin@example.com"),
    ]));

    let result = service(&fixture)
        .save_store(&admin_session(&admin), &mut dialog)
        .await;
    let Err(AppError::InvalidForm(errors)) = result else {
        panic!("expected invalid form, got {result:?}");
    };
    assert!(errors.contains_key("owner_email"));
}

#[tokio::test]
async fn store_form_enforces_name_length_and_unique_email() {
    let (fixture, admin) = fixture_with_admin().await;
    let existing = fixture.add_store("Book Haven", "books@example.com", None).await;

    let mut dialog = store_dialog();
    let long_name = "S".repeat(61);
    dialog.open_create(form_values(&[
        ("name", long_name.as_str()),
        ("email", "other@example.com"),
        ("address", "1 Long Road"),
    ]));
    let result = service(&fixture)
        .save_store(&admin_session(&admin), &mut dialog)
        .await;
    assert!(matches!(result, Err(AppError::InvalidForm(_))));
    assert_eq!(
        dialog.draft().errors().get("name"),
        Some("Store name must be at most 60 characters")
    );

    let mut dialog = store_dialog();
    dialog.open_create(form_values(&[
        ("name", "Book Haven Two"),
        ("email", "books@example.com"),
        ("address", "3 Reader Lane"),
    ]));
    let result = service(&fixture)
        .save_store(&admin_session(&admin), &mut dialog)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let mut dialog = store_dialog();
    dialog.open_edit(existing.id(), store_form_values(&existing, None));
    let saved = service(&fixture)
        .save_store(&admin_session(&admin), &mut dialog)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(saved.id(), existing.id());
}

#[tokio::test]
async fn deleting_store_cascades_ratings() {
    let (fixture, admin) = fixture_with_admin().await;
    let user = fixture
        .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
        .await;
    let doomed = fixture.add_store("Book Haven", "books@example.com", None).await;
    let kept = fixture.add_store("Home Depot", "home@example.com", None).await;
    fixture.add_rating(&doomed, &user, 4, 2).await;
    fixture.add_rating(&kept, &user, 2, 2).await;

    service(&fixture)
        .delete_store(&admin_session(&admin), doomed.id())
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let ratings = fixture.ratings.ratings.lock().await;
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].store_id(), kept.id());
}

#[tokio::test]
async fn admin_store_table_includes_averages() {
    let (fixture, admin) = fixture_with_admin().await;
    let user = fixture
        .add_user("Jane Customer Smith Doe", "jane@example.com", Role::User)
        .await;
    let store = fixture.add_store("Book Haven", "books@example.com", None).await;
    fixture.add_rating(&store, &user, 4, 2).await;

    let rows = service(&fixture)
        .list_stores(&admin_session(&admin), &table(TablePreset::AdminStores))
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    assert_eq!(rows.len(), 1);
    assert!((rows[0].rating - 4.0).abs() < f64::EPSILON);
    assert_eq!(rows[0].user_rating, None);
}
