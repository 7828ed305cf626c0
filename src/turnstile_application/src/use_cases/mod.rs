pub mod oauth2;
pub mod resend_verification;
pub mod signin;
pub mod signup;
pub mod verify_email;

// Re-export for convenience
pub use oauth2::{OAuth2Command, OAuth2Error, OAuth2UseCase};
pub use resend_verification::{
    ResendVerificationCommand, ResendVerificationError, ResendVerificationUseCase,
};
pub use signin::{SigninCommand, SigninError, SigninUseCase};
pub use signup::{SignupCommand, SignupError, SignupUseCase};
pub use verify_email::{VerifyEmailCommand, VerifyEmailError, VerifyEmailUseCase};
