pub mod in_memory_user_repository;
pub mod pg_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use pg_user_repository::PgUserRepository;
