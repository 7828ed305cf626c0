//! # Turnstile - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the
//! authentication service components. Use this crate to get access to the
//! whole service in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `User`, `UserDto`, `SocialProfile`, etc.
//! - **Port traits**: `UserRepository`, `Mailer`
//! - **Use cases**: `SignupUseCase`, `SigninUseCase`, `VerifyEmailUseCase`,
//!   `ResendVerificationUseCase`, `OAuth2UseCase`
//! - **Adapters**: `PgUserRepository`, `InMemoryUserRepository`,
//!   `PostmarkMailer`, `GoogleProfileClient`, etc.
//! - **Service**: `AuthService` - the composed HTTP surface

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and port traits
pub mod core {
    pub use turnstile_core::*;
}

// Re-export the most commonly used core types at the root level
pub use turnstile_core::{
    MailNotification, Mailer, MailerError, NewUser, OAuthIdentity, RepositoryError, SocialProfile,
    User, UserDto, UserRepository, UserUpdate,
};

// ============================================================================
// Use Cases and Services (Application Layer)
// ============================================================================

/// Application use cases and the token/credential services
pub mod application {
    pub use turnstile_application::*;
}

// Re-export use cases and services at root level
pub use turnstile_application::{
    OAuth2UseCase, PasswordHasher, ResendVerificationUseCase, SigninUseCase, SignupUseCase,
    TokenService, VerificationEmails, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use turnstile_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use turnstile_adapters::persistence::*;
    }

    /// Mailer implementations
    pub mod email {
        pub use turnstile_adapters::email::*;
    }

    /// OAuth2 provider clients
    pub mod oauth {
        pub use turnstile_adapters::oauth::*;
    }

    /// Configuration
    pub mod config {
        pub use turnstile_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use turnstile_adapters::{
    ConsoleMailer, GoogleProfileClient, InMemoryUserRepository, MockMailer, PgUserRepository,
    PostmarkMailer, Settings, SettingsError,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use turnstile_auth_service::{
    AuthService, AuthServiceConfig, get_postgres_pool, run_migrations,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Re-export axum so the service router can be mounted into a host app
pub use axum;
