pub mod config;
pub mod email;
pub mod http;
pub mod oauth;
pub mod persistence;

// Re-export for convenience
pub use config::{AllowedOrigins, Settings, SettingsError};
pub use email::{ConsoleMailer, MockMailer, PostmarkMailer};
pub use oauth::GoogleProfileClient;
pub use persistence::{InMemoryUserRepository, PgUserRepository};
