//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_rating_repository;
mod in_memory_store_repository;
mod in_memory_user_repository;

pub use in_memory_rating_repository::InMemoryRatingRepository;
pub use in_memory_store_repository::InMemoryStoreRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
