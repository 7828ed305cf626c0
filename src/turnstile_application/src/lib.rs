pub mod credentials;
pub mod email;
pub mod token;
pub mod use_cases;

// Re-export for convenience
pub use credentials::{CredentialError, HashParams, PasswordHasher};
pub use email::{EmailBuildError, VERIFICATION_EMAIL_SUBJECT, VerificationEmails};
pub use token::{DEFAULT_TOKEN_VALIDITY_SECONDS, TokenError, TokenService, VerificationClaims};
pub use use_cases::{
    OAuth2Command, OAuth2Error, OAuth2UseCase, ResendVerificationCommand,
    ResendVerificationError, ResendVerificationUseCase, SigninCommand, SigninError, SigninUseCase,
    SignupCommand, SignupError, SignupUseCase, VerifyEmailCommand, VerifyEmailError,
    VerifyEmailUseCase,
};
