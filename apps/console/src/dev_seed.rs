use chrono::NaiveDate;
use storerate_core::{AppError, AppResult};
use storerate_domain::{
    EmailAddress, Rating, RatingId, RatingValue, Role, Store, StoreId, User, UserId,
};
use storerate_infrastructure::{
    InMemoryRatingRepository, InMemoryStoreRepository, InMemoryUserRepository,
};
use tracing::info;

const SEED_USERS: [(&str, &str, &str, Role); 5] = [
    (
        "John Administrator Smith Johnson",
        "john@example.com",
        "123 Admin St, Manager City",
        Role::Admin,
    ),
    (
        "Jane Regular User Williams Davis",
        "jane@example.com",
        "456 User Ave, Customer Town",
        Role::User,
    ),
    (
        "Bob Store Owner Brown Miller",
        "bob@example.com",
        "789 Shop Blvd, Business City",
        Role::Owner,
    ),
    (
        "Alice Regular User Wilson Moore",
        "alice@example.com",
        "101 Client Rd, Buyer Village",
        Role::User,
    ),
    (
        "Charlie Store Owner Taylor Anderson",
        "charlie@example.com",
        "202 Merchant Lane, Vendor City",
        Role::Owner,
    ),
];

/// Store name, email, address and owner email.
const SEED_STORES: [(&str, &str, &str, Option<&str>); 5] = [
    (
        "Electronics Store",
        "electronics@example.com",
        "123 Tech St, Digital City",
        Some("bob@example.com"),
    ),
    (
        "Grocery Market",
        "grocery@example.com",
        "456 Food Ave, Fresh Town",
        None,
    ),
    (
        "Fashion Boutique",
        "fashion@example.com",
        "789 Style Blvd, Trend City",
        Some("charlie@example.com"),
    ),
    ("Home Depot", "home@example.com", "101 Builder Rd, Fix City", None),
    (
        "Book Haven",
        "books@example.com",
        "202 Reader Lane, Knowledge Town",
        None,
    ),
];

/// Store email, rating user email, stars and submission day.
const SEED_RATINGS: [(&str, &str, u8, &str); 12] = [
    ("electronics@example.com", "john@example.com", 5, "2025-05-01"),
    ("electronics@example.com", "jane@example.com", 4, "2025-04-28"),
    ("electronics@example.com", "alice@example.com", 5, "2025-04-20"),
    ("electronics@example.com", "charlie@example.com", 4, "2025-04-15"),
    ("grocery@example.com", "john@example.com", 4, "2025-04-10"),
    ("grocery@example.com", "alice@example.com", 3, "2025-04-12"),
    ("fashion@example.com", "jane@example.com", 5, "2025-04-02"),
    ("fashion@example.com", "bob@example.com", 4, "2025-03-30"),
    ("home@example.com", "alice@example.com", 4, "2025-03-22"),
    ("home@example.com", "charlie@example.com", 4, "2025-03-18"),
    ("books@example.com", "john@example.com", 5, "2025-03-11"),
    ("books@example.com", "bob@example.com", 4, "2025-03-05"),
];

/// In-memory repositories for one console run.
pub struct SeededRepositories {
    pub users: InMemoryUserRepository,
    pub stores: InMemoryStoreRepository,
    pub ratings: InMemoryRatingRepository,
}

/// Returns the seeded account signed in for `role` when no email is
/// configured.
pub fn default_email_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "john@example.com",
        Role::User => "jane@example.com",
        Role::Owner => "bob@example.com",
    }
}

pub fn empty() -> SeededRepositories {
    SeededRepositories {
        users: InMemoryUserRepository::new(),
        stores: InMemoryStoreRepository::new(),
        ratings: InMemoryRatingRepository::new(),
    }
}

pub fn run() -> AppResult<SeededRepositories> {
    let users = SEED_USERS
        .iter()
        .map(|(name, email, address, role)| {
            User::new(UserId::new(), *name, *email, *address, *role)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let stores = SEED_STORES
        .iter()
        .map(|(name, email, address, owner_email)| {
            let owner_id = owner_email
                .map(|owner_email| seeded_user(&users, owner_email).map(User::id))
                .transpose()?;
            Store::new(StoreId::new(), *name, *email, *address, owner_id)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let ratings = SEED_RATINGS
        .iter()
        .map(|(store_email, user_email, stars, day)| {
            let store_email = EmailAddress::new(*store_email)?;
            let store = stores
                .iter()
                .find(|store| store.email() == &store_email)
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "seed rating references unknown store '{}'",
                        store_email.as_str()
                    ))
                })?;
            let user = seeded_user(&users, user_email)?;
            let submitted_on = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|error| {
                AppError::Internal(format!("invalid seed date '{day}': {error}"))
            })?;

            Ok(Rating::new(
                RatingId::new(),
                store.id(),
                user.id(),
                RatingValue::new(*stars)?,
                submitted_on,
            ))
        })
        .collect::<AppResult<Vec<_>>>()?;

    info!(
        users = users.len(),
        stores = stores.len(),
        ratings = ratings.len(),
        "seeded in-memory repositories"
    );

    Ok(SeededRepositories {
        users: InMemoryUserRepository::with_users(users),
        stores: InMemoryStoreRepository::with_stores(stores),
        ratings: InMemoryRatingRepository::with_ratings(ratings),
    })
}

fn seeded_user<'a>(users: &'a [User], email: &str) -> AppResult<&'a User> {
    let email = EmailAddress::new(email)?;
    users
        .iter()
        .find(|user| user.email() == &email)
        .ok_or_else(|| {
            AppError::Internal(format!(
                "seed references unknown user '{}'",
                email.as_str()
            ))
        })
}
