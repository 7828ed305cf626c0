pub mod auth_service;
pub mod helpers;
pub mod tracing;

pub use auth_service::{AuthService, AuthServiceConfig};
pub use helpers::{get_postgres_pool, run_migrations};
